//! Registry Module
//!
//! Read access to the registration subsystem: stored dashboard
//! configurations and webhook subscriptions.

mod memory;
mod seed;

use async_trait::async_trait;

use crate::cache::StoreError;
use crate::models::{DashboardConfig, Webhook};

pub use memory::{MemoryConfigStore, MemoryWebhookStore};
pub use seed::Seed;

/// Source of dashboard configurations.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// The configuration with `id`, if one exists.
    async fn get(&self, id: &str) -> Result<Option<DashboardConfig>, StoreError>;

    /// Every stored configuration.
    async fn list(&self) -> Result<Vec<DashboardConfig>, StoreError>;
}

/// Source of webhook subscriptions.
#[async_trait]
pub trait WebhookStore: Send + Sync {
    /// Subscriptions for `event` in `country`, including country wildcards.
    async fn matching(&self, event: &str, country: &str) -> Result<Vec<Webhook>, StoreError>;

    /// Number of registered subscriptions.
    async fn count(&self) -> Result<usize, StoreError>;
}
