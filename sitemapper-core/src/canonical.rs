// URL canonicalization and domain scoping

use crate::error::{CrawlError, Result};
use std::fmt;
use tracing::info;
use url::{Position, Url};

/// A URL reduced to scheme, authority, path and (non-empty) query.
///
/// The fragment is always gone and an empty path is always `/`, so two
/// references that differ only by `#anchor` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedUrl(Url);

impl NormalizedUrl {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The graph key for this URL. The query string is not part of it.
    pub fn path(&self) -> &str {
        self.0.path()
    }

    pub fn authority(&self) -> &str {
        authority(&self.0)
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for NormalizedUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// `userinfo@host:port` exactly as serialized, empty for host-less URLs.
fn authority(url: &Url) -> &str {
    &url[Position::BeforeUsername..Position::AfterPort]
}

/// Drop the fragment and an empty query, default the path to `/`.
pub fn normalize(url: &Url) -> NormalizedUrl {
    let mut url = url.clone();
    url.set_fragment(None);
    if url.query().is_some_and(str::is_empty) {
        url.set_query(None);
    }
    if url.path().is_empty() && !url.cannot_be_a_base() {
        url.set_path("/");
    }
    NormalizedUrl(url)
}

fn has_http_scheme(raw: &str) -> bool {
    let lower = raw.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// The authority as typed, i.e. the text between `://` and the first `/`,
/// `?` or `#`. The parser collapses `http:///page` into host `page`, so this
/// has to be checked before parsing.
fn raw_authority(candidate: &str) -> &str {
    let rest = candidate
        .split_once("://")
        .map_or(candidate, |(_, rest)| rest);
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    &rest[..end]
}

/// Scopes every URL of a crawl to the seed's authority.
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    seed: NormalizedUrl,
    domain: String,
}

impl Canonicalizer {
    /// Accept a user-entered target, assuming `http://` when no http(s)
    /// scheme is present.
    pub fn init_seed(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let candidate = if has_http_scheme(raw) {
            raw.to_string()
        } else {
            format!("http://{}", raw)
        };

        if raw_authority(&candidate).is_empty() {
            return Err(CrawlError::InvalidSeed(raw.to_string()));
        }

        let parsed = Url::parse(&candidate)
            .map_err(|e| CrawlError::InvalidSeed(format!("{} ({})", raw, e)))?;
        let seed = normalize(&parsed);

        let domain = seed.authority().to_string();
        if domain.is_empty() {
            return Err(CrawlError::InvalidSeed(raw.to_string()));
        }

        info!("Seed {} scoped to domain {}", seed, domain);
        Ok(Self { seed, domain })
    }

    pub fn seed(&self) -> &NormalizedUrl {
        &self.seed
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Join `raw` against `base` and keep it only if it stays on the
    /// crawl's domain. Malformed references resolve to `None` as well.
    pub fn resolve(&self, raw: &str, base: &NormalizedUrl) -> Option<NormalizedUrl> {
        let joined = normalize(&base.as_url().join(raw).ok()?);
        self.is_in_domain(&joined).then_some(joined)
    }

    pub fn is_in_domain(&self, url: &NormalizedUrl) -> bool {
        url.authority() == self.domain
    }
}
