//! Typed errors for the menu extraction library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so the orchestrator can
//! map each failure kind onto a response.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur during extraction and cache operations.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Model provider unavailable or failed
    #[error("AI service error: {0}")]
    AI(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Model call exceeded its time budget
    #[error("AI service timed out after {0:?}")]
    Timeout(Duration),

    /// Storage operation failed
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl ExtractionError {
    /// Wrap any displayable storage failure.
    pub fn storage(err: impl std::fmt::Display) -> Self {
        Self::Storage(err.to_string().into())
    }
}

/// Errors that can occur while fetching a page.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// HTTP request failed (connection, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// Invalid URL format
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Request exceeded its time budget
    #[error("timed out fetching: {url}")]
    Timeout { url: String },
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Result type alias for crawl operations.
pub type CrawlResult<T> = std::result::Result<T, CrawlError>;
