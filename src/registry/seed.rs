//! Startup seed data.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use super::{MemoryConfigStore, MemoryWebhookStore};
use crate::models::{DashboardConfig, Webhook};

/// Dashboards and webhooks to preload, as read from a JSON file:
///
/// ```json
/// { "dashboards": [ { "id": "...", "country": "...", "isoCode": "...", "features": {} } ],
///   "webhooks":   [ { "id": "...", "url": "...", "event": "INVOKE", "country": "" } ] }
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Seed {
    pub dashboards: Vec<DashboardConfig>,
    pub webhooks: Vec<Webhook>,
}

impl Seed {
    /// Reads and parses a seed file.
    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading seed file {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing seed file {}", path.display()))
    }

    /// Inserts the seed records into the stores.
    pub async fn apply(self, configs: &MemoryConfigStore, webhooks: &MemoryWebhookStore) {
        for config in self.dashboards {
            configs.insert(config).await;
        }
        for webhook in self.webhooks {
            webhooks.insert(webhook).await;
        }
    }
}
