//! Mock fetcher for testing.
//!
//! Provides a configurable mock implementation of the PageFetcher trait.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{CrawlError, CrawlResult};
use crate::traits::fetcher::PageFetcher;
use crate::types::page::FetchedPage;

#[derive(Clone)]
enum MockResponse {
    Html(String),
    Status(u16),
    Unreachable,
}

/// Mock fetcher for testing.
///
/// Returns canned HTML per URL (or a fallback for any URL) and records every
/// call so tests can assert whether a fetch happened.
///
/// # Example
///
/// ```rust
/// use menu_extraction::MockFetcher;
///
/// let mock = MockFetcher::new()
///     .with_page("https://example.test/menu", "<p>Guláš 149 Kč</p>");
/// assert_eq!(mock.fetch_count(), 0);
/// ```
#[derive(Default, Clone)]
pub struct MockFetcher {
    responses: Arc<RwLock<HashMap<String, MockResponse>>>,
    fallback: Arc<RwLock<Option<MockResponse>>>,
    delay: Option<Duration>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    /// Create a new mock that fails every URL until configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` for `url`.
    pub fn with_page(self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.responses
            .write()
            .unwrap()
            .insert(url.into(), MockResponse::Html(html.into()));
        self
    }

    /// Serve `html` for any URL without a specific response.
    pub fn with_any_page(self, html: impl Into<String>) -> Self {
        *self.fallback.write().unwrap() = Some(MockResponse::Html(html.into()));
        self
    }

    /// Answer `url` with an HTTP error status.
    pub fn with_status(self, url: impl Into<String>, status: u16) -> Self {
        self.responses
            .write()
            .unwrap()
            .insert(url.into(), MockResponse::Status(status));
        self
    }

    /// Make `url` unreachable (connection failure).
    pub fn with_unreachable(self, url: impl Into<String>) -> Self {
        self.responses
            .write()
            .unwrap()
            .insert(url.into(), MockResponse::Unreachable);
        self
    }

    /// Sleep before answering, to exercise timeouts and cancellation.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of fetches performed.
    pub fn fetch_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// URLs fetched, in call order.
    pub fn fetch_calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Check if a URL was fetched.
    pub fn was_fetched(&self, url: &str) -> bool {
        self.calls.read().unwrap().iter().any(|u| u == url)
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> CrawlResult<FetchedPage> {
        self.calls.write().unwrap().push(url.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let response = self
            .responses
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .or_else(|| self.fallback.read().unwrap().clone())
            .unwrap_or(MockResponse::Unreachable);

        match response {
            MockResponse::Html(html) => Ok(FetchedPage::from_html(url, html)),
            MockResponse::Status(status) => Err(CrawlError::Status {
                url: url.to_string(),
                status,
            }),
            MockResponse::Unreachable => Err(CrawlError::Http(
                format!("connection refused: {}", url).into(),
            )),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_serves_configured_page() {
        let mock = MockFetcher::new().with_page("https://example.test/a", "<p>Page A</p>");

        let page = mock.fetch("https://example.test/a").await.unwrap();
        assert_eq!(page.text, "Page A");
        assert!(mock.was_fetched("https://example.test/a"));
    }

    #[tokio::test]
    async fn test_mock_failures() {
        let mock = MockFetcher::new()
            .with_status("https://example.test/gone", 404)
            .with_unreachable("https://example.test/down");

        assert!(matches!(
            mock.fetch("https://example.test/gone").await,
            Err(CrawlError::Status { status: 404, .. })
        ));
        assert!(matches!(
            mock.fetch("https://example.test/down").await,
            Err(CrawlError::Http(_))
        ));
        // Unconfigured URLs are unreachable too
        assert!(mock.fetch("https://example.test/other").await.is_err());
        assert_eq!(mock.fetch_count(), 3);
    }

    #[tokio::test]
    async fn test_fallback_page_and_shared_call_log() {
        let mock = MockFetcher::new().with_any_page("<p>Anything</p>");
        let clone = mock.clone();

        clone.fetch("https://example.test/x").await.unwrap();
        assert_eq!(mock.fetch_calls(), vec!["https://example.test/x".to_string()]);
    }
}
