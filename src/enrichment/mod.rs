//! Enrichment Module
//!
//! Turns stored dashboard configurations into populated dashboards and
//! reports read-time events.

mod events;
mod service;

pub use events::{EventTrigger, LOW_TEMPERATURE_THRESHOLD};
pub use service::EnrichmentService;
