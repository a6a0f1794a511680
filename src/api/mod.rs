//! API Module
//!
//! HTTP handlers and routing for the dashboard REST API.
//!
//! # Endpoints
//! - `GET /dashboard/v1/dashboards/:id` - One populated dashboard
//! - `GET /dashboard/v1/dashboards` - All populated dashboards
//! - `GET /dashboard/v1/status` - Registry sizes, uptime and cache counters
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{create_router, API_PREFIX};
