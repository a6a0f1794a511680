//! API Routes
//!
//! Configures the Axum router with all dashboard endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    dashboard_handler, dashboards_handler, health_handler, status_handler, AppState,
};

/// Prefix shared by the versioned dashboard endpoints.
pub const API_PREFIX: &str = "/dashboard/v1";

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/dashboards", get(dashboards_handler))
        .route("/dashboards/:id", get(dashboard_handler))
        .route("/status", get(status_handler));

    Router::new()
        .nest(API_PREFIX, api)
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
