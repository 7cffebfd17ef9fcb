use crate::canonical::NormalizedUrl;
use crate::engine::{CrawlEngine, CrawlState, CrawlSummary, DEFAULT_DELAY, ProgressCallback, VisitLimit};
use crate::error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use sitemapper_scanner::client::DEFAULT_USER_AGENT;
use sitemapper_scanner::{HttpClient, ScraperExtractor};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// Options for configuring a crawl operation
pub struct CrawlOptions {
    pub target: String,
    pub limit: VisitLimit,
    pub delay: Duration,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub show_progress_bars: bool,
}

impl CrawlOptions {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            limit: VisitLimit::Unbounded,
            delay: DEFAULT_DELAY,
            timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            show_progress_bars: false,
        }
    }
}

/// Everything left behind by a finished crawl, read-only from here on.
pub struct CrawlOutcome {
    pub seed: NormalizedUrl,
    pub domain: String,
    pub state: CrawlState,
    pub summary: CrawlSummary,
    pub elapsed: Duration,
}

/// Extract the path component from a URL
pub fn extract_url_path(url: &str) -> String {
    Url::parse(url)
        .ok()
        .map(|u| {
            let path = u.path().to_string();
            if path.is_empty() || path == "/" {
                "/".to_string()
            } else {
                path
            }
        })
        .unwrap_or_else(|| url.to_string())
}

/// Crawl `options.target` over HTTP and return the finished sitemap.
///
/// An invalid target fails here, before any request is made.
pub async fn execute_crawl(options: CrawlOptions) -> Result<CrawlOutcome> {
    let CrawlOptions {
        target,
        limit,
        delay,
        timeout_secs,
        user_agent,
        show_progress_bars,
    } = options;

    let client = HttpClient::with_settings(timeout_secs, &user_agent)?;
    let prober = HttpClient::with_settings(timeout_secs, &user_agent)?;
    let extractor = ScraperExtractor::new()?;

    let mut engine = CrawlEngine::new(&target, client, prober, extractor)?
        .with_limit(limit)
        .with_delay(delay);

    // Spinner for overall crawl progress (only if enabled)
    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Starting crawl...");

        let spinner = pb.clone();
        let spinner_update: ProgressCallback = Arc::new(move |attempt: usize, url: String| {
            spinner.set_message(format!("Crawling #{}: {}", attempt, extract_url_path(&url)));
        });
        engine = engine.with_progress_callback(spinner_update);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    let summary = engine.crawl().await;
    let elapsed = start.elapsed();

    if let Some(ref pb) = progress_bar {
        pb.finish_and_clear();
    }

    let seed = engine.seed().clone();
    let domain = engine.domain().to_string();

    Ok(CrawlOutcome {
        seed,
        domain,
        state: engine.into_state(),
        summary,
        elapsed,
    })
}
