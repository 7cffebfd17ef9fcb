//! The crawl loop.
//!
//! A [`CrawlEngine`] owns every piece of mutable crawl state (frontier,
//! sitemap graph, blacklist and counters) in a single [`CrawlState`] and
//! drives it through a strictly sequential visit loop:
//!
//! 1. pop the next URL from the frontier, skipping blacklisted entries;
//! 2. fetch it, blacklisting it on any failure;
//! 3. extract asset and link references from the body and fold them into
//!    the graph, probing assets and queueing newly discovered pages.
//!
//! The loop ends when the frontier is empty or the visit limit is used up.
//! Only one request is ever in flight.

use crate::blacklist::Blacklist;
use crate::canonical::{Canonicalizer, NormalizedUrl};
use crate::error::Result;
use crate::frontier::Frontier;
use crate::graph::SitemapGraph;
use serde::{Deserialize, Serialize};
use sitemapper_scanner::client::indicates_existence;
use sitemapper_scanner::{
    AssetProber, AssetReference, ExtractedReferences, HtmlExtractor, LinkReference, PageFetcher,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Pause between two page fetches unless configured otherwise.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// Called before each fetch with the attempt number and the URL.
pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

/// How many fetch attempts a crawl may make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VisitLimit {
    #[default]
    Unbounded,
    Pages(usize),
}

impl VisitLimit {
    /// Whether another fetch may start after `attempts` have been made.
    pub fn allows(&self, attempts: usize) -> bool {
        match self {
            VisitLimit::Unbounded => true,
            VisitLimit::Pages(max) => attempts < *max,
        }
    }
}

impl From<Option<usize>> for VisitLimit {
    fn from(limit: Option<usize>) -> Self {
        limit.map_or(VisitLimit::Unbounded, VisitLimit::Pages)
    }
}

/// Frontier, graph and blacklist, mutated as one unit by the engine.
#[derive(Debug, Default, Clone)]
pub struct CrawlState {
    frontier: Frontier,
    graph: SitemapGraph,
    blacklist: Blacklist,
    fetch_attempts: usize,
    pages_fetched: usize,
    probes: usize,
}

impl CrawlState {
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn graph(&self) -> &SitemapGraph {
        &self.graph
    }

    pub fn blacklist(&self) -> &Blacklist {
        &self.blacklist
    }

    pub fn fetch_attempts(&self) -> usize {
        self.fetch_attempts
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    pub fn probes(&self) -> usize {
        self.probes
    }
}

/// Counters describing a finished crawl.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlSummary {
    pub fetch_attempts: usize,
    pub pages_fetched: usize,
    pub failed_fetches: usize,
    pub probes: usize,
    pub nodes: usize,
    pub edges: usize,
    pub blacklisted: usize,
    pub frontier_remaining: usize,
    pub limit_reached: bool,
}

pub struct CrawlEngine<F, P, X> {
    canonicalizer: Canonicalizer,
    state: CrawlState,
    fetcher: F,
    prober: P,
    extractor: X,
    limit: VisitLimit,
    delay: Duration,
    progress_callback: Option<ProgressCallback>,
}

impl<F, P, X> CrawlEngine<F, P, X>
where
    F: PageFetcher,
    P: AssetProber,
    X: HtmlExtractor,
{
    /// Scope the crawl to `target` and seed the frontier with it.
    ///
    /// Fails with [`crate::CrawlError::InvalidSeed`] before any state
    /// exists when the target has no authority.
    pub fn new(target: &str, fetcher: F, prober: P, extractor: X) -> Result<Self> {
        let canonicalizer = Canonicalizer::init_seed(target)?;
        let mut state = CrawlState::default();
        state.frontier.push(canonicalizer.seed().clone());

        Ok(Self {
            canonicalizer,
            state,
            fetcher,
            prober,
            extractor,
            limit: VisitLimit::Unbounded,
            delay: DEFAULT_DELAY,
            progress_callback: None,
        })
    }

    pub fn with_limit(mut self, limit: VisitLimit) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn seed(&self) -> &NormalizedUrl {
        self.canonicalizer.seed()
    }

    pub fn domain(&self) -> &str {
        self.canonicalizer.domain()
    }

    pub fn limit(&self) -> VisitLimit {
        self.limit
    }

    pub fn state(&self) -> &CrawlState {
        &self.state
    }

    pub fn graph(&self) -> &SitemapGraph {
        &self.state.graph
    }

    pub fn into_state(self) -> CrawlState {
        self.state
    }

    /// Run the visit loop to completion.
    pub async fn crawl(&mut self) -> CrawlSummary {
        info!(
            "Starting crawl of {} (domain {}, limit {:?})",
            self.canonicalizer.seed(),
            self.canonicalizer.domain(),
            self.limit
        );

        let mut limit_reached = false;
        loop {
            if !self.limit.allows(self.state.fetch_attempts) {
                limit_reached = !self.state.frontier.is_empty();
                break;
            }

            let Some(url) = self.select_next() else {
                break;
            };

            if self.state.fetch_attempts > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            self.visit(url).await;
        }

        let summary = self.summary(limit_reached);
        info!(
            "Crawl complete. {} fetch attempts, {} nodes, {} edges, {} blacklisted",
            summary.fetch_attempts, summary.nodes, summary.edges, summary.blacklisted
        );
        summary
    }

    fn summary(&self, limit_reached: bool) -> CrawlSummary {
        CrawlSummary {
            fetch_attempts: self.state.fetch_attempts,
            pages_fetched: self.state.pages_fetched,
            failed_fetches: self.state.fetch_attempts - self.state.pages_fetched,
            probes: self.state.probes,
            nodes: self.state.graph.node_count(),
            edges: self.state.graph.edge_count(),
            blacklisted: self.state.blacklist.len(),
            frontier_remaining: self.state.frontier.len(),
            limit_reached,
        }
    }

    /// Pop until a URL that is not blacklisted comes up.
    fn select_next(&mut self) -> Option<NormalizedUrl> {
        while let Some(url) = self.state.frontier.pop_front() {
            if self.state.blacklist.contains(&url) {
                debug!("Skipping blacklisted url: {}", url);
                continue;
            }
            return Some(url);
        }
        None
    }

    async fn visit(&mut self, url: NormalizedUrl) {
        self.state.fetch_attempts += 1;
        if let Some(ref callback) = self.progress_callback {
            callback(self.state.fetch_attempts, url.to_string());
        }

        info!(
            "Processing {} ({} URLs left)",
            url,
            self.state.frontier.len()
        );

        match self.fetcher.fetch(url.as_str()).await {
            Ok(body) => {
                self.state.pages_fetched += 1;
                let references = self.extractor.extract(&body);
                self.process_references(&url, references).await;
            }
            Err(failure) => {
                warn!("Failed to fetch {}: {}", url, failure);
                self.state.blacklist.add(&url);
            }
        }
    }

    async fn process_references(&mut self, page: &NormalizedUrl, references: ExtractedReferences) {
        debug!(
            "{} references {} assets and {} links",
            page,
            references.assets.len(),
            references.links.len()
        );

        for asset in &references.assets {
            self.process_asset(page, asset).await;
        }

        for link in &references.links {
            self.process_link(page, link);
        }
    }

    async fn process_asset(&mut self, page: &NormalizedUrl, asset: &AssetReference) {
        let Some(asset_url) = self.canonicalizer.resolve(&asset.raw_src, page) else {
            debug!("  -> Asset {} is off-domain, skipping", asset.raw_src);
            return;
        };

        let current_path = page.path();
        if self.state.graph.has_edge(current_path, asset_url.path())
            || self.state.blacklist.contains(&asset_url)
        {
            return;
        }

        self.state.probes += 1;
        let exists = match self.prober.probe(asset_url.as_str()).await {
            Ok(status) if indicates_existence(status) => true,
            Ok(status) => {
                warn!("Got status code {} from asset: {}", status, asset_url);
                false
            }
            Err(e) => {
                warn!("Probe failed for {}: {}", asset_url, e);
                false
            }
        };

        if exists {
            self.state.graph.add_edge(current_path, asset_url.path());
        } else {
            self.state.blacklist.add(&asset_url);
        }
    }

    fn process_link(&mut self, page: &NormalizedUrl, link: &LinkReference) {
        let Some(link_url) = self.canonicalizer.resolve(&link.raw_href, page) else {
            debug!("  -> Link {} is off-domain, skipping", link.raw_href);
            return;
        };

        let current_path = page.path();
        let link_path = link_url.path();
        if current_path == link_path
            || self.state.graph.has_edge(current_path, link_path)
            || self.state.graph.has_node(link_path)
            || self.state.blacklist.contains(&link_url)
        {
            return;
        }

        self.state.graph.add_edge(current_path, link_path);
        debug!("  -> Adding {} to the queue", link_url);
        self.state.frontier.push(link_url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visit_limit_allows() {
        assert!(VisitLimit::Unbounded.allows(usize::MAX - 1));
        assert!(VisitLimit::Pages(2).allows(0));
        assert!(VisitLimit::Pages(2).allows(1));
        assert!(!VisitLimit::Pages(2).allows(2));
        assert!(!VisitLimit::Pages(0).allows(0));
    }

    #[test]
    fn test_visit_limit_from_option() {
        assert_eq!(VisitLimit::from(None), VisitLimit::Unbounded);
        assert_eq!(VisitLimit::from(Some(5)), VisitLimit::Pages(5));
    }
}
