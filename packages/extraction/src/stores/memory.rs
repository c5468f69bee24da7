//! In-memory cache for testing and development.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{ExtractionError, Result};
use crate::traits::store::MenuCache;
use crate::types::entry::CacheEntry;

type Key = (String, NaiveDate);

/// In-memory menu cache.
///
/// Useful for testing and development. Not suitable for production
/// as data is lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<Key, CacheEntry>>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> ExtractionError {
    ExtractionError::storage("memory store lock poisoned")
}

#[async_trait]
impl MenuCache for MemoryStore {
    async fn get_entry(&self, source_url: &str, date: NaiveDate) -> Result<Option<CacheEntry>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(&(source_url.to_string(), date)).cloned())
    }

    async fn put_entry(&self, entry: &CacheEntry) -> Result<()> {
        self.entries
            .write()
            .map_err(poisoned)?
            .insert(entry.key(), entry.clone());
        Ok(())
    }

    async fn evict_written_before(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        let before = entries.len();
        entries.retain(|_, entry| entry.written_at >= cutoff);
        Ok((before - entries.len()) as u64)
    }

    async fn count_entries(&self) -> Result<usize> {
        Ok(self.entries.read().map_err(poisoned)?.len())
    }
}
