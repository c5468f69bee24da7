//! Storage trait for cached menus.
//!
//! Backends implement four primitives (`get_entry`, `put_entry`,
//! `evict_written_before`, `count_entries`). The cache contract the
//! orchestrator relies on (`lookup`, `upsert`, `evict_older_than`) is
//! provided on top of them so every backend applies the same freshness and
//! retention rules.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::error::Result;
use crate::types::{entry::CacheEntry, menu::MenuDocument};

/// Persistent cache of menu documents keyed by (source URL, logical date).
#[async_trait]
pub trait MenuCache: Send + Sync {
    /// Get the entry for an exact (source URL, date) pair, regardless of age.
    async fn get_entry(&self, source_url: &str, date: NaiveDate) -> Result<Option<CacheEntry>>;

    /// Store an entry, replacing any entry with the same key.
    ///
    /// Must be insert-or-replace: repeated writes for one key leave exactly
    /// one entry, and readers never observe a partially written row.
    async fn put_entry(&self, entry: &CacheEntry) -> Result<()>;

    /// Delete every entry written before `cutoff`. Returns the number removed.
    async fn evict_written_before(&self, cutoff: DateTime<Utc>) -> Result<u64>;

    /// Total number of stored entries.
    async fn count_entries(&self) -> Result<usize>;

    /// Get a cached document if it is at most `max_age` old.
    ///
    /// Expired entries are reported as a miss and left in place; removing
    /// them is the retention sweep's job.
    async fn lookup(
        &self,
        source_url: &str,
        date: NaiveDate,
        max_age: Duration,
    ) -> Result<Option<MenuDocument>> {
        let now = Utc::now();
        Ok(self
            .get_entry(source_url, date)
            .await?
            .filter(|entry| entry.is_fresh(now, max_age))
            .map(|entry| entry.document))
    }

    /// Store a document for the pair, stamped with the current time.
    async fn upsert(&self, source_url: &str, date: NaiveDate, document: &MenuDocument) -> Result<()> {
        self.put_entry(&CacheEntry::new(source_url, date, document.clone()))
            .await
    }

    /// Remove every entry older than `max_age`. Returns the number removed.
    async fn evict_older_than(&self, max_age: Duration) -> Result<u64> {
        self.evict_written_before(Utc::now() - max_age).await
    }
}
