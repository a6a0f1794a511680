//! TTL Cache Module
//!
//! Typed get/set over a [`DocumentStore`], enforcing per-read freshness.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::entry::CacheEntry;
use super::stats::{CacheStats, StatsRecorder};
use super::store::{DocumentStore, StoreError};
use super::Category;

// == Cache Miss ==
/// Why a read did not produce a value.
///
/// Misses never reach callers of the enrichment service; they only decide
/// whether the provider is asked again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheMiss {
    /// No record under the key
    #[error("no cached record")]
    NotFound,

    /// The record is older than the allowed age
    #[error("cached record expired ({age_secs}s old)")]
    Expired { age_secs: u64 },

    /// The record could not be decoded into the expected shape
    #[error("cached record could not be decoded: {0}")]
    Decode(String),
}

// == TTL Cache ==
/// Timestamped cache over a shared document store.
///
/// Constructed once at startup and shared by reference; it keeps no state of
/// its own besides counters.
pub struct TtlCache {
    store: Arc<dyn DocumentStore>,
    stats: StatsRecorder,
}

impl TtlCache {
    // == Constructor ==
    /// Creates a cache writing through `store`.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            stats: StatsRecorder::default(),
        }
    }

    // == Write ==
    /// Stores `payload` stamped with the current time, replacing any previous entry.
    pub async fn write<T>(&self, category: Category, key: &str, payload: &T) -> Result<(), StoreError>
    where
        T: Serialize + Sync,
    {
        self.write_entry(category, key, &CacheEntry::new(payload)).await
    }

    /// Stores a prepared entry as is, keeping its timestamp.
    pub async fn write_entry<T>(
        &self,
        category: Category,
        key: &str,
        entry: &CacheEntry<T>,
    ) -> Result<(), StoreError>
    where
        T: Serialize + Sync,
    {
        let collection = category.collection();
        let result = match serde_json::to_value(entry) {
            Ok(record) => self.store.write(collection, key, record).await,
            Err(e) => Err(StoreError::Write {
                collection: collection.to_string(),
                key: key.to_string(),
                reason: e.to_string(),
            }),
        };

        if result.is_err() {
            self.stats.record_write_failure();
        }
        result
    }

    // == Read ==
    /// Returns the payload under `key` if it is at most `max_age` old.
    ///
    /// A failing store is logged and reported as [`CacheMiss::NotFound`].
    pub async fn read<T>(&self, category: Category, key: &str, max_age: Duration) -> Result<T, CacheMiss>
    where
        T: DeserializeOwned,
    {
        let record = match self.store.read(category.collection(), key).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                self.stats.record_not_found();
                return Err(CacheMiss::NotFound);
            }
            Err(e) => {
                warn!("Cache read for {} '{}' failed: {}", category, key, e);
                self.stats.record_not_found();
                return Err(CacheMiss::NotFound);
            }
        };

        let entry: CacheEntry<T> = match serde_json::from_value(record) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Discarding undecodable {} cache entry '{}': {}", category, key, e);
                self.stats.record_decode();
                return Err(CacheMiss::Decode(e.to_string()));
            }
        };

        if entry.is_expired(max_age) {
            let age_secs = entry.age().as_secs();
            debug!("{} cache entry '{}' expired ({}s old)", category, key, age_secs);
            self.stats.record_expired();
            return Err(CacheMiss::Expired { age_secs });
        }

        self.stats.record_hit();
        Ok(entry.data)
    }

    // == Purge ==
    /// Deletes every entry of `category` older than the category TTL.
    pub async fn purge_expired(&self, category: Category) -> Result<usize, StoreError> {
        let ttl = chrono::Duration::seconds(category.ttl().as_secs() as i64);
        let cutoff = Utc::now() - ttl;
        self.store
            .delete_older_than(category.collection(), cutoff)
            .await
    }

    // == Stats ==
    /// Returns a snapshot of the hit and miss counters.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }
}
