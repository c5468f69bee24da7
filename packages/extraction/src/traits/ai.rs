//! Model extraction trait.
//!
//! The extractor only talks to the model: it returns the raw completion text.
//! Parsing, validation and post-processing belong to the pipeline, so a
//! malformed answer can be reported together with what the model said.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;

/// Input for one extraction call.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionRequest<'a> {
    /// Visible page text
    pub text: &'a str,

    /// Page the text came from
    pub source_url: &'a str,

    /// Day whose menu should be extracted
    pub date: NaiveDate,
}

impl<'a> ExtractionRequest<'a> {
    pub fn new(text: &'a str, source_url: &'a str, date: NaiveDate) -> Self {
        Self {
            text,
            source_url,
            date,
        }
    }
}

/// Extracts a menu from page text using a language model.
#[async_trait]
pub trait MenuExtractor: Send + Sync {
    /// Ask the model for today's menu; returns the raw model output.
    async fn extract(&self, request: &ExtractionRequest<'_>) -> Result<String>;

    /// Get the extractor name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
