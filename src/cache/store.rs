//! Cache Store Module
//!
//! Main cache engine: a HashMap of entries with absolute expiry, checked
//! lazily on access against an injected clock.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, Clock, MonotonicClock};

// == TTL Cache ==
/// In-memory key/value cache with per-entry time-to-live.
///
/// No operation fails: a missing or stale key simply reads as absent.
/// Entries are never evicted for space, only for age or on request.
#[derive(Debug)]
pub struct TtlCache {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
    /// TTL applied by `set_default`
    default_ttl: Duration,
    /// Time source used for every expiry decision
    clock: Arc<dyn Clock>,
}

impl TtlCache {
    // == Constructor ==
    /// Creates an empty cache on a monotonic clock.
    pub fn new(default_ttl: Duration) -> Self {
        Self::with_clock(default_ttl, MonotonicClock::new())
    }

    /// Creates an empty cache driven by the given clock.
    pub fn with_clock(default_ttl: Duration, clock: impl Clock + 'static) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            default_ttl,
            clock: Arc::new(clock),
        }
    }

    /// Returns the TTL used by `set_default`.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // == Get ==
    /// Returns the stored value if it has not yet expired.
    ///
    /// A stale entry is removed on the spot and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        let now = self.clock.now_ms();

        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            self.stats.record_expiration();
            self.stats.record_miss();
            self.stats.set_total_entries(self.entries.len());
            debug!(key, "evicted expired cache entry");
            return None;
        }

        self.stats.record_hit();
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Set ==
    /// Stores `value` under `key` until `now + ttl`.
    ///
    /// Any existing entry for the key is replaced, live or not.
    pub fn set(&mut self, key: impl Into<String>, value: Value, ttl: Duration) {
        let now = self.clock.now_ms();
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);

        self.entries
            .insert(key.into(), CacheEntry::new(value, now, ttl_ms));
        self.stats.set_total_entries(self.entries.len());
    }

    /// Stores `value` under `key` with the default TTL.
    pub fn set_default(&mut self, key: impl Into<String>, value: Value) {
        self.set(key, value, self.default_ttl);
    }

    // == Get Or Insert ==
    /// Returns the live value for `key`, or computes, stores and returns it.
    pub fn get_or_insert_with<F>(&mut self, key: &str, ttl: Duration, compute: F) -> Value
    where
        F: FnOnce() -> Value,
    {
        if let Some(value) = self.get(key) {
            return value;
        }

        let value = compute();
        self.set(key, value.clone(), ttl);
        value
    }

    // == Delete ==
    /// Removes an entry regardless of its expiry state.
    ///
    /// Returns whether anything was stored under the key.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.stats.record_invalidations(1);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    // == Clear ==
    /// Removes every entry. Returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.stats.record_invalidations(count);
        self.stats.set_total_entries(0);
        count
    }

    // == Time To Live ==
    /// Remaining lifetime of a live entry, `None` if missing or stale.
    pub fn ttl_remaining_ms(&self, key: &str) -> Option<u64> {
        let now = self.clock.now_ms();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.ttl_remaining_ms(now))
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Number of stored entries, including stale ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use serde_json::json;

    const TTL: Duration = Duration::from_secs(300);

    fn manual_cache() -> (TtlCache, ManualClock) {
        let clock = ManualClock::new(0);
        (TtlCache::with_clock(TTL, clock.clone()), clock)
    }

    #[test]
    fn test_store_new() {
        let cache = TtlCache::new(TTL);
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.default_ttl(), TTL);
    }

    #[test]
    fn test_store_set_and_get() {
        let (mut cache, _) = manual_cache();

        cache.set("aging:2026-10", json!({"grandTotal": 100}), TTL);

        assert_eq!(cache.get("aging:2026-10"), Some(json!({"grandTotal": 100})));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let (mut cache, _) = manual_cache();
        assert_eq!(cache.get("nonexistent"), None);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_store_overwrite_resets_value_and_ttl() {
        let (mut cache, clock) = manual_cache();

        cache.set("k", json!(1), Duration::from_secs(10));
        clock.advance_secs(8);
        cache.set("k", json!(2), Duration::from_secs(10));
        clock.advance_secs(8);

        assert_eq!(cache.get("k"), Some(json!(2)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_store_ttl_expiration() {
        let (mut cache, clock) = manual_cache();

        cache.set("k", json!("v"), Duration::from_secs(1));
        assert!(cache.get("k").is_some());

        clock.advance_ms(1_000);
        assert!(cache.get("k").is_some(), "live at the expiry instant");

        clock.advance_ms(1);
        assert_eq!(cache.get("k"), None);
        assert!(cache.is_empty(), "stale entry evicted on access");

        let stats = cache.stats();
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_store_stale_entries_linger_until_accessed() {
        let (mut cache, clock) = manual_cache();

        cache.set("a", json!(1), Duration::from_secs(1));
        cache.set("b", json!(2), Duration::from_secs(1));
        clock.advance_secs(5);

        assert_eq!(cache.len(), 2);
        cache.get("a");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_store_delete_before_expiry() {
        let (mut cache, _) = manual_cache();

        cache.set("k", json!("v"), TTL);
        assert!(cache.delete("k"));

        assert!(cache.is_empty());
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_store_delete_nonexistent_is_harmless() {
        let (mut cache, _) = manual_cache();
        assert!(!cache.delete("nonexistent"));
        assert_eq!(cache.stats().invalidations, 0);
    }

    #[test]
    fn test_store_clear() {
        let (mut cache, _) = manual_cache();

        cache.set("a", json!(1), TTL);
        cache.set("b", json!(2), TTL);

        assert_eq!(cache.clear(), 2);
        assert!(cache.is_empty());
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.stats().invalidations, 2);
    }

    #[test]
    fn test_store_set_default_uses_configured_ttl() {
        let clock = ManualClock::new(0);
        let mut cache = TtlCache::with_clock(Duration::from_secs(2), clock.clone());

        cache.set_default("k", json!(true));
        assert_eq!(cache.ttl_remaining_ms("k"), Some(2_000));

        clock.advance_secs(3);
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_store_get_or_insert_with_memoizes() {
        let (mut cache, clock) = manual_cache();
        let mut calls = 0;

        let first = cache.get_or_insert_with("report", Duration::from_secs(60), || {
            calls += 1;
            json!({"grandTotal": 42})
        });
        let second = cache.get_or_insert_with("report", Duration::from_secs(60), || {
            calls += 1;
            json!({"grandTotal": 0})
        });

        assert_eq!(first, second);
        assert_eq!(calls, 1);

        clock.advance_secs(61);
        let third = cache.get_or_insert_with("report", Duration::from_secs(60), || {
            calls += 1;
            json!({"grandTotal": 7})
        });
        assert_eq!(third, json!({"grandTotal": 7}));
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_store_ttl_remaining_ignores_stale_entries() {
        let (mut cache, clock) = manual_cache();

        cache.set("k", json!(1), Duration::from_secs(10));
        clock.advance_secs(4);
        assert_eq!(cache.ttl_remaining_ms("k"), Some(6_000));

        clock.advance_secs(7);
        assert_eq!(cache.ttl_remaining_ms("k"), None);
        assert_eq!(cache.ttl_remaining_ms("missing"), None);
    }

    #[test]
    fn test_store_stats() {
        let (mut cache, _) = manual_cache();

        cache.set("k", json!(1), TTL);
        cache.get("k"); // hit
        cache.get("nonexistent"); // miss

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_store_zero_ttl_lives_for_the_current_instant() {
        let (mut cache, clock) = manual_cache();

        cache.set("k", json!(1), Duration::ZERO);
        assert!(cache.get("k").is_some());

        clock.advance_ms(1);
        assert!(cache.get("k").is_none());
    }
}
