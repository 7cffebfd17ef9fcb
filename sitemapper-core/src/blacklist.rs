use crate::canonical::NormalizedUrl;
use std::collections::HashSet;
use tracing::info;

/// URLs that failed to fetch, were not HTML, or failed an existence probe.
///
/// Entries are full normalized URLs, query included.
#[derive(Debug, Default, Clone)]
pub struct Blacklist {
    urls: HashSet<NormalizedUrl>,
}

impl Blacklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &NormalizedUrl) -> bool {
        self.urls.contains(url)
    }

    pub fn add(&mut self, url: &NormalizedUrl) {
        if self.urls.insert(url.clone()) {
            info!("Adding to the blacklist: {}", url);
        }
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Blacklisted URLs in lexical order.
    pub fn urls(&self) -> Vec<&NormalizedUrl> {
        let mut urls: Vec<&NormalizedUrl> = self.urls.iter().collect();
        urls.sort();
        urls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::normalize;
    use url::Url;

    fn url(s: &str) -> NormalizedUrl {
        normalize(&Url::parse(s).unwrap())
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut blacklist = Blacklist::new();
        let bad = url("http://test.com/missing");

        blacklist.add(&bad);
        blacklist.add(&bad);

        assert!(blacklist.contains(&bad));
        assert_eq!(blacklist.len(), 1);
    }

    #[test]
    fn test_query_variants_are_distinct_entries() {
        let mut blacklist = Blacklist::new();
        blacklist.add(&url("http://test.com/search?q=1"));

        assert!(blacklist.contains(&url("http://test.com/search?q=1#frag")));
        assert!(!blacklist.contains(&url("http://test.com/search?q=2")));
        assert!(!blacklist.contains(&url("http://test.com/search")));
    }
}
