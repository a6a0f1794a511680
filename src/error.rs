//! Error types for the dashboard server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::providers::ProviderError;

// == Dashboard Error Enum ==
/// Errors an enrichment request can end with.
///
/// Cache misses and cache write failures never appear here; they are
/// absorbed where they happen.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// An upstream provider failed
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The country has no currency to quote rates from
    #[error("failed to fetch currency data: no base currency for country '{0}'")]
    NoBaseCurrency(String),

    /// No dashboard configuration with this ID
    #[error("Dashboard not found: {0}")]
    ConfigNotFound(String),

    /// The configuration store could not be read
    #[error("Failed to load dashboard configurations: {0}")]
    ConfigStore(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match &self {
            DashboardError::Provider(_) | DashboardError::NoBaseCurrency(_) => {
                StatusCode::BAD_GATEWAY
            }
            DashboardError::ConfigNotFound(_) => StatusCode::NOT_FOUND,
            DashboardError::ConfigStore(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the dashboard server.
pub type Result<T> = std::result::Result<T, DashboardError>;
