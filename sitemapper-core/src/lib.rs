pub mod blacklist;
pub mod canonical;
pub mod crawl;
pub mod engine;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod report;

pub use blacklist::Blacklist;
pub use canonical::{Canonicalizer, NormalizedUrl, normalize};
pub use engine::{CrawlEngine, CrawlState, CrawlSummary, VisitLimit};
pub use error::{CrawlError, Result};
pub use frontier::Frontier;
pub use graph::SitemapGraph;
