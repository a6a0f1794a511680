//! Domain and response models
//!
//! Dashboard configurations, normalized provider data, and the DTOs
//! serialized back to HTTP clients.

pub mod domain;
pub mod responses;

use chrono::Utc;

// Re-export commonly used types
pub use domain::{
    Coordinates, CountryInfo, CountryName, CurrencyDetails, DashboardConfig, ExchangeRates,
    FeatureConfig, WeatherData, Webhook,
};
pub use responses::{
    CacheStatusResponse, EnrichedDashboard, ErrorResponse, HealthResponse, PopulatedFeatures,
    StatusResponse,
};

/// Layout of the human-readable timestamps in responses and webhook payloads.
pub const TIMESTAMP_LAYOUT: &str = "%Y%m%d %H:%M";

/// Current UTC time formatted with [`TIMESTAMP_LAYOUT`].
pub fn current_timestamp() -> String {
    Utc::now().format(TIMESTAMP_LAYOUT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_timestamp_layout() {
        let ts = current_timestamp();
        // e.g. "20250101 13:37"
        assert_eq!(ts.len(), 14);
        assert_eq!(&ts[8..9], " ");
        assert_eq!(&ts[11..12], ":");
    }
}
