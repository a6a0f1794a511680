//! Dashboard Enricher - populates country dashboards from public APIs
//!
//! Reads dashboard configurations, fills in country, weather and currency
//! data through a TTL cache, and notifies webhook subscribers of reads.

pub mod api;
pub mod cache;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod models;
pub mod notify;
pub mod providers;
pub mod registry;
pub mod tasks;

pub use api::{create_router, AppState};
pub use config::Config;
pub use enrichment::EnrichmentService;
pub use error::DashboardError;
pub use tasks::spawn_purge_task;
