pub mod client;
pub mod error;
pub mod extract;
pub mod result;
pub mod traits;

pub use async_trait::async_trait;
pub use client::HttpClient;
pub use error::ScanError;
pub use extract::ScraperExtractor;
pub use result::{AssetReference, ExtractedReferences, FetchFailure, LinkReference};
pub use traits::{AssetProber, HtmlExtractor, PageFetcher};
