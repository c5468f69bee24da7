//! Per-key in-flight leases.
//!
//! Concurrent cache misses for the same (URL, day) take turns on one async
//! mutex. Each key's lock carries a result slot: the first holder publishes
//! what its refresh produced, and requests that queued behind it take that
//! result instead of running the pipeline again. The slot lives only as long
//! as some request holds or waits for the key. Different keys never share a lock.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use tokio::sync::OwnedMutexGuard;

type LeaseKey = (String, NaiveDate);
type Slot<T> = tokio::sync::Mutex<Option<T>>;

/// Held while a refresh for one key runs. Dropping it releases the key.
pub struct Lease<T> {
    guard: OwnedMutexGuard<Option<T>>,
}

impl<T> Lease<T> {
    /// Result published by an earlier holder this request queued behind.
    pub fn shared(&self) -> Option<&T> {
        self.guard.as_ref()
    }

    /// Hand `value` to requests currently waiting on this key.
    pub fn publish(&mut self, value: T) {
        *self.guard = Some(value);
    }
}

/// Registry of per-key refresh locks.
///
/// Holds only weak handles: a key's lock lives as long as some request holds
/// or waits for it, and dead entries are pruned on the next acquire.
pub struct InflightRegistry<T> {
    locks: Mutex<HashMap<LeaseKey, Weak<Slot<T>>>>,
}

impl<T> Default for InflightRegistry<T> {
    fn default() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }
}

impl<T> InflightRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive use of the key.
    pub async fn acquire(&self, source_url: &str, date: NaiveDate) -> Lease<T> {
        let lock = self.lock_for((source_url.to_string(), date));
        Lease {
            guard: lock.lock_owned().await,
        }
    }

    /// Number of keys with a live lock.
    #[cfg(test)]
    fn active_keys(&self) -> usize {
        let locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.values().filter(|weak| weak.strong_count() > 0).count()
    }

    fn lock_for(&self, key: LeaseKey) -> Arc<Slot<T>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.retain(|_, weak| weak.strong_count() > 0);

        if let Some(existing) = locks.get(&key).and_then(Weak::upgrade) {
            return existing;
        }

        let lock = Arc::new(tokio::sync::Mutex::new(None));
        locks.insert(key, Arc::downgrade(&lock));
        lock
    }
}
