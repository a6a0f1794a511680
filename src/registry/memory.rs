//! In-memory registry stores.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ConfigStore, WebhookStore};
use crate::cache::StoreError;
use crate::models::{DashboardConfig, Webhook};

// == Config Store ==
/// Dashboard configurations held in memory, listed in ID order.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    configs: RwLock<BTreeMap<String, DashboardConfig>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `config`, replacing any configuration with the same ID.
    pub async fn insert(&self, config: DashboardConfig) {
        self.configs.write().await.insert(config.id.clone(), config);
    }

    /// Number of stored configurations.
    pub async fn len(&self) -> usize {
        self.configs.read().await.len()
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn get(&self, id: &str) -> Result<Option<DashboardConfig>, StoreError> {
        Ok(self.configs.read().await.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<DashboardConfig>, StoreError> {
        Ok(self.configs.read().await.values().cloned().collect())
    }
}

// == Webhook Store ==
/// Webhook subscriptions held in memory.
#[derive(Debug, Default)]
pub struct MemoryWebhookStore {
    hooks: RwLock<Vec<Webhook>>,
}

impl MemoryWebhookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a subscription, replacing any with the same ID.
    pub async fn insert(&self, webhook: Webhook) {
        let mut hooks = self.hooks.write().await;
        hooks.retain(|existing| existing.id != webhook.id);
        hooks.push(webhook);
    }
}

#[async_trait]
impl WebhookStore for MemoryWebhookStore {
    async fn matching(&self, event: &str, country: &str) -> Result<Vec<Webhook>, StoreError> {
        Ok(self
            .hooks
            .read()
            .await
            .iter()
            .filter(|hook| hook.matches(event, country))
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.hooks.read().await.len())
    }
}
