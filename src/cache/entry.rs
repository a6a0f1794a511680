//! Cache Entry Module
//!
//! Defines the timestamped record every cached payload is wrapped in.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// == Cache Entry ==
/// A cached payload together with the instant it was written.
///
/// `timestamp` is set once on construction and never touched again. A newer
/// value for the same key is a new entry that replaces this one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// Write instant (UTC)
    pub timestamp: DateTime<Utc>,
    /// The cached payload
    pub data: T,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Wraps `data` with the current time.
    pub fn new(data: T) -> Self {
        Self::written_at(data, Utc::now())
    }

    /// Wraps `data` with an explicit write instant.
    pub fn written_at(data: T, timestamp: DateTime<Utc>) -> Self {
        Self { timestamp, data }
    }

    // == Age ==
    /// Time elapsed since the entry was written.
    ///
    /// Entries stamped in the future (clock skew between writers) have age zero.
    pub fn age(&self) -> Duration {
        (Utc::now() - self.timestamp).to_std().unwrap_or(Duration::ZERO)
    }

    // == Is Expired ==
    /// Returns true once the entry is strictly older than `max_age`.
    pub fn is_expired(&self, max_age: Duration) -> bool {
        self.age() > max_age
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    #[test]
    fn test_entry_creation() {
        let before = Utc::now();
        let entry = CacheEntry::new("payload".to_string());

        assert_eq!(entry.data, "payload");
        assert!(entry.timestamp >= before);
        assert!(!entry.is_expired(Duration::from_secs(60)));
    }

    #[test]
    fn test_entry_expired_after_max_age() {
        let entry = CacheEntry::written_at(1u32, Utc::now() - ChronoDuration::hours(3));

        assert!(entry.is_expired(Duration::from_secs(2 * 3600)));
        assert!(!entry.is_expired(Duration::from_secs(4 * 3600)));
    }

    #[test]
    fn test_future_timestamp_has_zero_age() {
        let entry = CacheEntry::written_at((), Utc::now() + ChronoDuration::minutes(5));

        assert_eq!(entry.age(), Duration::ZERO);
        assert!(!entry.is_expired(Duration::ZERO));
    }

    #[test]
    fn test_entry_serializes_timestamp_and_data() {
        let entry = CacheEntry::new(vec![1, 2, 3]);
        let json = serde_json::to_value(&entry).unwrap();

        assert!(json.get("timestamp").is_some());
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
    }
}
