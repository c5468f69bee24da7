//! HTTP page fetcher.
//!
//! Plain reqwest GET with browser-like headers. No JavaScript rendering, so
//! menus injected client-side come back as an (almost) empty page.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::error::{CrawlError, CrawlResult};
use crate::traits::fetcher::PageFetcher;
use crate::types::page::FetchedPage;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetcher that downloads a page over HTTP(S).
///
/// # Example
///
/// ```rust,ignore
/// use menu_extraction::{HttpFetcher, PageFetcher};
///
/// let fetcher = HttpFetcher::new()?.with_timeout(Duration::from_secs(10));
/// let page = fetcher.fetch("https://www.spojka-karlin.cz/menu").await?;
/// ```
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher with default headers and a 10s timeout.
    pub fn new() -> CrawlResult<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            reqwest::header::HeaderValue::from_static("cs-CZ,cs;q=0.9,en;q=0.5"),
        );

        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| CrawlError::Http(Box::new(e)))?;

        Ok(Self {
            client,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add https:// when the caller passed a bare host, then validate.
    fn normalize_url(url: &str) -> CrawlResult<Url> {
        let trimmed = url.trim();
        let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("https://{}", trimmed)
        };

        let parsed = Url::parse(&candidate).map_err(|_| CrawlError::InvalidUrl {
            url: url.to_string(),
        })?;

        if parsed.host_str().is_none() {
            return Err(CrawlError::InvalidUrl {
                url: url.to_string(),
            });
        }

        Ok(parsed)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> CrawlResult<FetchedPage> {
        let target = Self::normalize_url(url)?;
        debug!(url = %target, "HTTP fetch starting");

        let response = self
            .client
            .get(target.clone())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %target, error = %e, "HTTP request failed");
                if e.is_timeout() {
                    CrawlError::Timeout {
                        url: url.to_string(),
                    }
                } else {
                    CrawlError::Http(Box::new(e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %target, status = %status, "HTTP error status");
            return Err(CrawlError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();

        let html = response.text().await.map_err(|e| {
            if e.is_timeout() {
                CrawlError::Timeout {
                    url: url.to_string(),
                }
            } else {
                CrawlError::Http(Box::new(e))
            }
        })?;

        let page = FetchedPage::from_html(url, html).with_final_url(final_url);

        debug!(
            url = %url,
            html_bytes = page.html.len(),
            text_chars = page.text.chars().count(),
            "Page fetched"
        );

        Ok(page)
    }

    fn name(&self) -> &str {
        "http"
    }
}
