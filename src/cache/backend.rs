//! Cache Backend Module
//!
//! The interface route handlers use to reach a cache, and the in-memory
//! implementation the service runs with.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::cache::{CacheStats, CacheStore};
use crate::clock::SharedClock;
use crate::error::Result;

/// Key-value store with expiring entries.
///
/// Implementations must be safe to share between tasks. Concurrent writes to
/// the same key are allowed to race; the last one wins.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Returns the live value under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Stores `value` under `key`, expiring after `ttl_seconds`.
    async fn set(&self, key: &str, value: Value, ttl_seconds: u64) -> Result<()>;

    /// Removes `key`; returns whether an entry was removed.
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Drops every expired entry; returns how many were dropped.
    async fn purge_expired(&self) -> usize;

    /// Snapshot of the backend's counters.
    async fn stats(&self) -> CacheStats;
}

// == Memory Cache ==
/// [`CacheStore`] behind an async lock, reading time from an injected clock.
#[derive(Debug)]
pub struct MemoryCache {
    store: RwLock<CacheStore>,
    clock: SharedClock,
}

impl MemoryCache {
    pub fn new(max_entries: usize, clock: SharedClock) -> Self {
        Self {
            store: RwLock::new(CacheStore::new(max_entries)),
            clock,
        }
    }

    /// Seconds left on `key`, if it is live.
    pub async fn ttl_remaining(&self, key: &str) -> Option<u64> {
        let now = self.clock.now();
        self.store.read().await.ttl_remaining(key, now)
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let now = self.clock.now();
        // Write lock: expired entries are removed and stats updated on read
        let mut store = self.store.write().await;
        Ok(store.get(key, now))
    }

    async fn set(&self, key: &str, value: Value, ttl_seconds: u64) -> Result<()> {
        let now = self.clock.now();
        let mut store = self.store.write().await;
        store.set(key.to_string(), value, ttl_seconds, now)
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut store = self.store.write().await;
        Ok(store.delete(key))
    }

    async fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut store = self.store.write().await;
        store.purge_expired(now)
    }

    async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::json;
    use std::sync::Arc;

    fn cache_with_clock() -> (MemoryCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
        ));
        (MemoryCache::new(100, clock.clone()), clock)
    }

    #[tokio::test]
    async fn test_memory_cache_roundtrip_and_expiry() {
        let (cache, clock) = cache_with_clock();

        cache.set("cat_cache", json!({"id": "a"}), 30).await.unwrap();
        assert_eq!(cache.get("cat_cache").await.unwrap(), Some(json!({"id": "a"})));
        assert_eq!(cache.ttl_remaining("cat_cache").await, Some(30));

        clock.advance(Duration::seconds(30));
        assert_eq!(cache.get("cat_cache").await.unwrap(), None);
        assert_eq!(cache.ttl_remaining("cat_cache").await, None);
    }

    #[tokio::test]
    async fn test_memory_cache_delete_and_stats() {
        let (cache, _clock) = cache_with_clock();

        cache.set("notes_cache", json!([]), 60).await.unwrap();
        assert!(cache.delete("notes_cache").await.unwrap());
        assert!(!cache.delete("notes_cache").await.unwrap());

        let stats = cache.stats().await;
        assert_eq!(stats.invalidations, 1);
        assert_eq!(stats.total_entries, 0);
    }

    #[tokio::test]
    async fn test_memory_cache_purge() {
        let (cache, clock) = cache_with_clock();

        cache.set("a", json!(1), 10).await.unwrap();
        cache.set("b", json!(2), 100).await.unwrap();
        clock.advance(Duration::seconds(50));

        assert_eq!(cache.purge_expired().await, 1);
        assert_eq!(cache.stats().await.total_entries, 1);
    }
}
