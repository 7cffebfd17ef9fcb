use crate::error::{Result, ScanError};
use crate::result::FetchFailure;
use crate::traits::{AssetProber, PageFetcher};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, redirect};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_USER_AGENT: &str = "Sitemapper/0.1 (https://github.com/trapdoorsec/sitemapper)";

/// reqwest-backed page fetcher and asset prober.
///
/// Two clients share the same settings except for redirects: page GETs
/// follow up to five hops, asset HEADs report the first status they get.
pub struct HttpClient {
    page_client: Client,
    probe_client: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        Self::with_timeout(10)
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        Self::with_settings(timeout_secs, DEFAULT_USER_AGENT)
    }

    pub fn with_settings(timeout_secs: u64, user_agent: &str) -> Result<Self> {
        let page_client = Self::client_builder(timeout_secs, user_agent)
            .redirect(redirect::Policy::limited(5))
            .build()?;
        let probe_client = Self::client_builder(timeout_secs, user_agent)
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self {
            page_client,
            probe_client,
        })
    }

    fn client_builder(timeout_secs: u64, user_agent: &str) -> reqwest::ClientBuilder {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs((timeout_secs / 2).max(1)))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
    }
}

/// True when the MIME essence of a `Content-Type` header is `text/html`.
/// Parameters such as `charset` are ignored.
pub fn is_html_content_type(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|ct| ct.split(';').next())
        .map(|essence| essence.trim().eq_ignore_ascii_case("text/html"))
        .unwrap_or(false)
}

/// True for any `2xx` or `3xx` status.
pub fn indicates_existence(status_code: u16) -> bool {
    (200..400).contains(&status_code)
}

#[async_trait]
impl PageFetcher for HttpClient {
    async fn fetch(&self, url: &str) -> std::result::Result<String, FetchFailure> {
        debug!("Fetching {}", url);

        let response = self
            .page_client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchFailure::Connection(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!("Got status code {} from url: {}", status.as_u16(), url);
            return Err(FetchFailure::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        if !is_html_content_type(content_type.as_deref()) {
            return Err(FetchFailure::NotHtml(content_type));
        }

        response
            .text()
            .await
            .map_err(|e| FetchFailure::Connection(e.to_string()))
    }
}

#[async_trait]
impl AssetProber for HttpClient {
    async fn probe(&self, url: &str) -> Result<u16> {
        debug!("Probing {}", url);
        let target = reqwest::Url::parse(url)
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", url, e)))?;
        let response = self.probe_client.head(target).send().await?;
        Ok(response.status().as_u16())
    }
}
