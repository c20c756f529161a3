//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with an expiry instant.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

// == Cache Entry ==
/// A cached JSON value and the instant it stops being served.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: Value,
    /// When the value was written
    pub created_at: DateTime<Utc>,
    /// When the value expires
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry written at `now` that lives for `ttl_seconds`.
    ///
    /// A TTL too large to represent saturates to the latest instant chrono
    /// supports.
    pub fn new(value: Value, ttl_seconds: u64, now: DateTime<Utc>) -> Self {
        let expires_at = i64::try_from(ttl_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            value,
            created_at: now,
            expires_at,
        }
    }

    // == Is Expired ==
    /// An entry is expired once `now` reaches its expiry instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    // == Time To Live ==
    /// Whole seconds left before expiry, zero once expired.
    pub fn ttl_remaining(&self, now: DateTime<Utc>) -> u64 {
        (self.expires_at - now).num_seconds().max(0) as u64
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new(json!({"a": 1}), 60, noon());

        assert_eq!(entry.value, json!({"a": 1}));
        assert_eq!(entry.created_at, noon());
        assert_eq!(entry.expires_at, noon() + Duration::seconds(60));
        assert!(!entry.is_expired(noon()));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new(json!(1), 60, noon());

        assert!(!entry.is_expired(noon() + Duration::seconds(59)));
        assert!(entry.is_expired(noon() + Duration::seconds(60)));
        assert!(entry.is_expired(noon() + Duration::seconds(61)));
    }

    #[test]
    fn test_ttl_remaining() {
        let entry = CacheEntry::new(json!(1), 60, noon());

        assert_eq!(entry.ttl_remaining(noon()), 60);
        assert_eq!(entry.ttl_remaining(noon() + Duration::seconds(45)), 15);
        assert_eq!(entry.ttl_remaining(noon() + Duration::seconds(90)), 0);
    }

    #[test]
    fn test_huge_ttl_saturates() {
        let entry = CacheEntry::new(json!(1), u64::MAX, noon());
        assert_eq!(entry.expires_at, DateTime::<Utc>::MAX_UTC);
        assert!(!entry.is_expired(noon()));
    }
}
