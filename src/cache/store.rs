//! TTL Cache Store Module
//!
//! In-process memoization of idempotent upstream reads with a fixed TTL and
//! lazy expiry.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::cache::{CacheEntry, CacheStats};

// == TTL Cache ==
/// Key-to-value store where every entry lives for the same fixed TTL.
///
/// Staleness is checked only when a key is read: an expired entry is removed
/// by the lookup that observes it and reported as a miss. There is no size
/// bound, so keys written once and never read again stay resident until
/// [`TtlCache::purge_expired`] is called.
///
/// All operations take `&self` and hold an internal mutex only for the
/// duration of a map operation, so a cache can be shared behind an `Arc`.
#[derive(Debug)]
pub struct TtlCache<V> {
    inner: Mutex<Inner<V>>,
    ttl: Duration,
}

#[derive(Debug)]
struct Inner<V> {
    entries: HashMap<String, CacheEntry<V>>,
    stats: CacheStats,
}

impl<V: Clone> TtlCache<V> {
    // == Constructor ==
    /// Creates an empty cache whose entries expire `ttl` after insertion.
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                stats: CacheStats::new(),
            }),
            ttl,
        }
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any previous entry and
    /// restarting its lifetime.
    pub fn set(&self, key: impl Into<String>, value: V) {
        let mut inner = self.lock();
        inner.entries.insert(key.into(), CacheEntry::new(value));
        let len = inner.entries.len();
        inner.stats.set_total_entries(len);
    }

    // == Get ==
    /// Returns the value for `key` if it was stored less than one TTL ago.
    ///
    /// Absent and expired keys both return `None`; an expired entry is
    /// removed before returning.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut guard = self.lock();
        let inner = &mut *guard;

        let expired = match inner.entries.get(key) {
            Some(entry) if !entry.is_expired(self.ttl) => {
                let value = entry.value.clone();
                inner.stats.record_hit();
                return Some(value);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            inner.entries.remove(key);
            inner.stats.record_expirations(1);
            inner.stats.set_total_entries(inner.entries.len());
        }
        inner.stats.record_miss();
        None
    }

    // == Purge Expired ==
    /// Removes every stale entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let mut guard = self.lock();
        let inner = &mut *guard;
        let ttl = self.ttl;

        let before = inner.entries.len();
        inner.entries.retain(|_, entry| !entry.is_expired(ttl));
        let removed = before - inner.entries.len();

        inner.stats.record_expirations(removed);
        inner.stats.set_total_entries(inner.entries.len());
        removed
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        let mut stats = inner.stats;
        stats.set_total_entries(inner.entries.len());
        stats
    }

    /// The TTL every entry is stored with.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of resident entries, including stale ones not yet observed.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    // A panic while holding the lock cannot leave the map half-updated, so a
    // poisoned guard is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, Inner<V>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::sync::Arc;

    const TTL: Duration = Duration::from_millis(30_000);

    #[test]
    fn test_store_new() {
        let cache: TtlCache<String> = TtlCache::new(TTL);
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.ttl(), TTL);
    }

    #[test]
    fn test_store_set_and_get() {
        let cache = TtlCache::new(TTL);

        cache.set("key1", "value1".to_string());

        assert_eq!(cache.get("key1"), Some("value1".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let cache: TtlCache<String> = TtlCache::new(TTL);
        assert_eq!(cache.get("nonexistent"), None);
    }

    #[test]
    fn test_store_overwrite() {
        let cache = TtlCache::new(TTL);

        cache.set("key1", 1);
        cache.set("key1", 2);

        assert_eq!(cache.get("key1"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_ttl_expiration() {
        let cache = TtlCache::new(Duration::from_secs(1));

        cache.set("key1", "value1");
        assert!(cache.get("key1").is_some());

        tokio::time::advance(Duration::from_millis(1000)).await;

        assert_eq!(cache.get("key1"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_read_evicts_entry() {
        let cache = TtlCache::new(Duration::from_secs(1));

        cache.set("key1", "value1");
        tokio::time::advance(Duration::from_secs(2)).await;

        // Still resident until something reads it
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("key1"), None);
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.stats().expirations, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overwrite_restarts_lifetime() {
        let cache = TtlCache::new(Duration::from_secs(10));

        cache.set("key1", "old");
        tokio::time::advance(Duration::from_secs(8)).await;
        cache.set("key1", "new");
        tokio::time::advance(Duration::from_secs(8)).await;

        assert_eq!(cache.get("key1"), Some("new"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_quote_scenario() {
        let cache: TtlCache<Value> = TtlCache::new(TTL);

        cache.set("quote:1:ETH:USDC", json!({"price": "3200"}));

        tokio::time::advance(Duration::from_millis(5_000)).await;
        assert_eq!(cache.get("quote:1:ETH:USDC"), Some(json!({"price": "3200"})));

        tokio::time::advance(Duration::from_millis(26_000)).await;
        assert_eq!(cache.get("quote:1:ETH:USDC"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_purge_expired() {
        let cache = TtlCache::new(Duration::from_secs(10));

        cache.set("key1", "value1");
        tokio::time::advance(Duration::from_secs(6)).await;
        cache.set("key2", "value2");
        tokio::time::advance(Duration::from_secs(5)).await;

        let removed = cache.purge_expired();
        assert_eq!(removed, 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("key2"), Some("value2"));
    }

    #[test]
    fn test_store_stats() {
        let cache = TtlCache::new(TTL);

        cache.set("key1", "value1");
        cache.get("key1"); // hit
        cache.get("nonexistent"); // miss

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_shared_across_threads() {
        let cache = Arc::new(TtlCache::new(TTL));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    cache.set(format!("key{}", i), i);
                    cache.get(&format!("key{}", i))
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), Some(i));
        }
        assert_eq!(cache.len(), 8);
    }
}
