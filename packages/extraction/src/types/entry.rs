//! Cache entry - one stored menu per (source URL, logical date).

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::menu::MenuDocument;

/// A cached menu document.
///
/// `date` is the menu day the document describes; `written_at` is the wall
/// clock time of the last write and is what freshness and retention look at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub source_url: String,
    pub date: NaiveDate,
    pub document: MenuDocument,
    pub written_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Create an entry written now.
    pub fn new(source_url: impl Into<String>, date: NaiveDate, document: MenuDocument) -> Self {
        Self {
            source_url: source_url.into(),
            date,
            document,
            written_at: Utc::now(),
        }
    }

    /// Set the write timestamp.
    pub fn with_written_at(mut self, written_at: DateTime<Utc>) -> Self {
        self.written_at = written_at;
        self
    }

    /// Whether the entry may still be served at `now`.
    pub fn is_fresh(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        now - self.written_at <= max_age
    }

    /// Composite key.
    pub fn key(&self) -> (String, NaiveDate) {
        (self.source_url.clone(), self.date)
    }
}
