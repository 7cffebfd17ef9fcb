use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("Invalid URL specified for crawling: {0}")]
    InvalidSeed(String),

    #[error("Failed to set up crawl collaborators: {0}")]
    Setup(#[from] sitemapper_scanner::ScanError),

    #[error("Report serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CrawlError>;
