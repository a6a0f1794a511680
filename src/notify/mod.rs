//! Notification Module
//!
//! Event names and the notifier seam that fans events out to subscribers.

mod webhook;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use webhook::{WebhookNotifier, WebhookPayload};

// == Event ==
/// Events subscribers can register for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Event {
    Register,
    Change,
    Patch,
    Delete,
    /// A populated dashboard was read
    Invoke,
    /// A populated dashboard reported a temperature below freezing
    LowTemp,
}

impl Event {
    /// Wire name of the event.
    pub fn as_str(self) -> &'static str {
        match self {
            Event::Register => "REGISTER",
            Event::Change => "CHANGE",
            Event::Patch => "PATCH",
            Event::Delete => "DELETE",
            Event::Invoke => "INVOKE",
            Event::LowTemp => "LOW_TEMP",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Delivery Report ==
/// Outcome of one fan-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Subscribers registered for the event and country
    pub matched: usize,
    /// Subscribers that answered with a success status
    pub delivered: usize,
}

// == Notifier ==
/// Delivers an event to everyone subscribed to it.
///
/// Delivery failures stay inside the notifier: they are logged and
/// reflected in the report, never returned as errors.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, event: Event, country: &str) -> DeliveryReport;
}
