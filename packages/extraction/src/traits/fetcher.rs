//! Page fetcher trait.
//!
//! A fetcher turns a URL into a [`FetchedPage`]. Only the single requested page
//! is fetched; there is no link following.

use async_trait::async_trait;

use crate::error::CrawlResult;
use crate::types::page::FetchedPage;

/// Fetches a single web page.
///
/// Implementations:
/// - `HttpFetcher` - reqwest with browser-like headers
/// - `MockFetcher` - canned pages for tests
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch one URL.
    ///
    /// Transport failures, timeouts and non-2xx responses are errors.
    async fn fetch(&self, url: &str) -> CrawlResult<FetchedPage>;

    /// Get the fetcher name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
