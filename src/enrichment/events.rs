//! Read-time event trigger.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::cache::country_key;
use crate::models::EnrichedDashboard;
use crate::notify::{Event, Notifier};

/// Temperatures strictly below this many °C raise [`Event::LowTemp`].
pub const LOW_TEMPERATURE_THRESHOLD: f64 = 0.0;

/// Reports the events a finished enrichment gives rise to.
#[derive(Clone)]
pub struct EventTrigger {
    notifier: Arc<dyn Notifier>,
}

impl EventTrigger {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Events for a populated dashboard: always `INVOKE`, plus `LOW_TEMP`
    /// when it carries a sub-zero temperature.
    pub fn events_for(dashboard: &EnrichedDashboard) -> Vec<Event> {
        let mut events = vec![Event::Invoke];
        if dashboard
            .features
            .temperature
            .is_some_and(|t| t < LOW_TEMPERATURE_THRESHOLD)
        {
            events.push(Event::LowTemp);
        }
        events
    }

    /// Sends the dashboard's events on a detached task.
    ///
    /// The task outlives the caller, so a dropped request still notifies.
    /// The scope is the ISO code trimmed and uppercased.
    pub fn dispatch(&self, dashboard: &EnrichedDashboard) -> JoinHandle<()> {
        let events = Self::events_for(dashboard);
        let scope = country_key(&dashboard.iso_code);
        let notifier = Arc::clone(&self.notifier);

        tokio::spawn(async move {
            for event in events {
                let report = notifier.notify(event, &scope).await;
                debug!(
                    "{} for {}: {}/{} webhooks delivered",
                    event, scope, report.delivered, report.matched
                );
            }
        })
    }
}
