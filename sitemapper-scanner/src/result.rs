use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a page GET did not produce an HTML body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    #[error("unexpected status code {0}")]
    Status(u16),

    #[error("non-HTML content type {}", .0.as_deref().unwrap_or("(none)"))]
    NotHtml(Option<String>),

    #[error("connection failed: {0}")]
    Connection(String),
}

/// The raw `src` value of an element that references a static asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetReference {
    pub raw_src: String,
}

/// The raw `href` value of an anchor element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkReference {
    pub raw_href: String,
}

/// Everything a page points at, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedReferences {
    pub assets: Vec<AssetReference>,
    pub links: Vec<LinkReference>,
}

impl ExtractedReferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_asset(mut self, raw_src: impl Into<String>) -> Self {
        self.assets.push(AssetReference {
            raw_src: raw_src.into(),
        });
        self
    }

    pub fn with_link(mut self, raw_href: impl Into<String>) -> Self {
        self.links.push(LinkReference {
            raw_href: raw_href.into(),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty() && self.links.is_empty()
    }
}
