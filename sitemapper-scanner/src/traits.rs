//! Seams between the crawl engine and the outside world.
//!
//! The engine never talks to the network or parses HTML itself; it goes
//! through these three traits. [`crate::HttpClient`] and
//! [`crate::ScraperExtractor`] are the production implementations.

use crate::error::Result;
use crate::result::{ExtractedReferences, FetchFailure};
use async_trait::async_trait;

/// Performs a GET and hands back the body of an HTML page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Only a `200` response whose content type is `text/html` yields a
    /// body. Everything else, including transport errors, is a
    /// [`FetchFailure`].
    async fn fetch(&self, url: &str) -> std::result::Result<String, FetchFailure>;
}

/// Performs a HEAD to check whether a static asset exists.
#[async_trait]
pub trait AssetProber: Send + Sync {
    /// Returns the raw status code. Redirects are not followed.
    async fn probe(&self, url: &str) -> Result<u16>;
}

/// Splits a page body into asset and link references.
pub trait HtmlExtractor: Send + Sync {
    fn extract(&self, body: &str) -> ExtractedReferences;
}
