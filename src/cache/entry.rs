//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with an absolute expiry.

use serde_json::Value;

// == Cache Entry ==
/// A memoized payload and the instant it stops being served.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// The stored payload
    pub value: Value,
    /// Creation time on the owning cache's clock (milliseconds)
    pub created_at: u64,
    /// Expiry time on the owning cache's clock (milliseconds)
    pub expires_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stored at `now_ms` that lives for `ttl_ms`.
    pub fn new(value: Value, now_ms: u64, ttl_ms: u64) -> Self {
        Self {
            value,
            created_at: now_ms,
            expires_at: now_ms.saturating_add(ttl_ms),
        }
    }

    // == Is Expired ==
    /// Checks whether the entry is stale at `now_ms`.
    ///
    /// The expiry instant itself is still live: an entry is served while
    /// `now_ms <= expires_at` and is stale strictly after it.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms > self.expires_at
    }

    // == Time To Live ==
    /// Returns the remaining lifetime in milliseconds, `0` once stale.
    pub fn ttl_remaining_ms(&self, now_ms: u64) -> u64 {
        self.expires_at.saturating_sub(now_ms)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new(json!({"total": 10}), 1_000, 5_000);

        assert_eq!(entry.value, json!({"total": 10}));
        assert_eq!(entry.created_at, 1_000);
        assert_eq!(entry.expires_at, 6_000);
        assert!(!entry.is_expired(1_000));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new(json!("v"), 0, 1_000);

        // Still live exactly at the expiry instant
        assert!(!entry.is_expired(1_000));
        assert!(entry.is_expired(1_001));
    }

    #[test]
    fn test_ttl_remaining() {
        let entry = CacheEntry::new(json!("v"), 0, 10_000);

        assert_eq!(entry.ttl_remaining_ms(0), 10_000);
        assert_eq!(entry.ttl_remaining_ms(4_000), 6_000);
        assert_eq!(entry.ttl_remaining_ms(20_000), 0);
    }

    #[test]
    fn test_expiry_saturates_instead_of_overflowing() {
        let entry = CacheEntry::new(json!(null), u64::MAX - 10, 1_000);
        assert_eq!(entry.expires_at, u64::MAX);
        assert!(!entry.is_expired(u64::MAX));
    }
}
