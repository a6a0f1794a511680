//! Response DTOs for the dashboard API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::models::{Coordinates, ExchangeRates};

/// A dashboard populated with the values its configuration selects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedDashboard {
    pub country: String,
    pub iso_code: String,
    pub features: PopulatedFeatures,
    /// When the values were assembled
    pub last_retrieval: String,
}

/// Selected values. Fields that were not selected are absent from the JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedFeatures {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precipitation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capital: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_currencies: Option<ExchangeRates>,
}

/// Response body for the status endpoint (GET /dashboard/v1/status)
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    /// HTTP status of the country provider, 503 if unreachable
    pub countries_api: u16,
    /// HTTP status of the weather provider, 503 if unreachable
    pub meteo_api: u16,
    /// HTTP status of the currency provider, 503 if unreachable
    pub currency_api: u16,
    /// 200 if the webhook store answered, 503 otherwise
    pub notification_db: u16,
    /// API version
    pub version: String,
    /// Seconds since the server started
    pub uptime: u64,
    /// Number of stored dashboard configurations
    pub dashboards: usize,
    /// Number of registered webhooks
    pub webhooks: usize,
    /// Cache counters
    pub cache: CacheStatusResponse,
}

/// Cache section of the status report
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatusResponse {
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for CacheStatusResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            stats,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
