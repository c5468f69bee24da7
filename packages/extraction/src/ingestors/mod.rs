//! Page fetcher implementations.
//!
//! # Available Fetchers
//!
//! - `HttpFetcher` - reqwest GET with browser-like headers
//! - `MockFetcher` - For testing

mod http;
mod mock;

pub use http::HttpFetcher;
pub use mock::MockFetcher;

// Re-export from traits for convenience
pub use crate::traits::fetcher::PageFetcher;
