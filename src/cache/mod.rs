//! Cache Module
//!
//! Cache-aside storage for provider data: timestamped entries kept in a
//! document store, one collection per data category, each with a fixed TTL.

mod entry;
mod keys;
mod stats;
mod store;
mod ttl;


use std::fmt;
use std::time::Duration;

use serde::Serialize;

// Re-export public types
pub use entry::CacheEntry;
pub use keys::{country_key, currency_key, weather_key, KEY_SEPARATOR};
pub use stats::CacheStats;
pub use store::{DocumentStore, MemoryDocumentStore, StoreError};
pub use ttl::{CacheMiss, TtlCache};

// == Public Constants ==
/// Collection holding REST Countries records
pub const COUNTRY_COLLECTION: &str = "country_cache";
/// Collection holding current weather readings
pub const WEATHER_COLLECTION: &str = "weather_cache";
/// Collection holding exchange rate sets
pub const CURRENCY_COLLECTION: &str = "currency_cache";

const HOUR: u64 = 60 * 60;

// == Category ==
/// The data categories a dashboard can be enriched with.
///
/// Both the read path and the purge loop take their TTL from
/// [`Category::ttl`], so the two can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Country,
    Weather,
    Currency,
}

impl Category {
    /// All categories, in purge order.
    pub const ALL: [Category; 3] = [Category::Country, Category::Weather, Category::Currency];

    /// Name of the durable collection backing this category.
    pub fn collection(self) -> &'static str {
        match self {
            Category::Country => COUNTRY_COLLECTION,
            Category::Weather => WEATHER_COLLECTION,
            Category::Currency => CURRENCY_COLLECTION,
        }
    }

    /// Maximum age of a cached value in this category.
    pub fn ttl(self) -> Duration {
        match self {
            Category::Country => Duration::from_secs(24 * HOUR),
            Category::Weather => Duration::from_secs(2 * HOUR),
            Category::Currency => Duration::from_secs(12 * HOUR),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Country => "country",
            Category::Weather => "weather",
            Category::Currency => "currency",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_ttls() {
        assert_eq!(Category::Country.ttl(), Duration::from_secs(86_400));
        assert_eq!(Category::Weather.ttl(), Duration::from_secs(7_200));
        assert_eq!(Category::Currency.ttl(), Duration::from_secs(43_200));
    }

    #[test]
    fn test_category_collections_are_distinct() {
        assert_eq!(Category::Country.collection(), "country_cache");
        assert_eq!(Category::Weather.collection(), "weather_cache");
        assert_eq!(Category::Currency.collection(), "currency_cache");
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::Weather.to_string(), "weather");
    }
}
