//! Document Store Module
//!
//! The durable key-value collaborator the cache writes through, plus an
//! in-memory implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

/// Name of the timestamp field every cache record carries.
pub const TIMESTAMP_FIELD: &str = "timestamp";

// == Store Error ==
/// Failures reported by a document store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store refused or failed to persist a record
    #[error("failed to write '{key}' to {collection}: {reason}")]
    Write {
        collection: String,
        key: String,
        reason: String,
    },

    /// The store could not be queried
    #[error("failed to read from {collection}: {reason}")]
    Read { collection: String, reason: String },
}

// == Document Store ==
/// Collection-scoped key-value storage of JSON records.
///
/// Implementations must be safe to share between tasks. Writes replace whole
/// records, so concurrent writers to one key leave the last write in place.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Stores `record` under `key`, replacing any previous record.
    async fn write(&self, collection: &str, key: &str, record: Value) -> Result<(), StoreError>;

    /// Fetches the record under `key`, or `None` if there is none.
    async fn read(&self, collection: &str, key: &str) -> Result<Option<Value>, StoreError>;

    /// Deletes every record whose `timestamp` is before `cutoff`.
    ///
    /// Returns the number of records removed.
    async fn delete_older_than(
        &self,
        collection: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<usize, StoreError>;
}

// == Memory Document Store ==
/// Document store kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, HashMap<String, Value>>>,
}

impl MemoryDocumentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held in `collection`.
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, HashMap::len)
    }
}

/// Reads the write instant out of a raw record.
///
/// Records without a parseable timestamp yield `None` and are left alone by purges.
fn record_timestamp(record: &Value) -> Option<DateTime<Utc>> {
    record
        .get(TIMESTAMP_FIELD)
        .and_then(Value::as_str)
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|ts| ts.with_timezone(&Utc))
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn write(&self, collection: &str, key: &str, record: Value) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), record);
        Ok(())
    }

    async fn read(&self, collection: &str, key: &str) -> Result<Option<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(key))
            .cloned())
    }

    async fn delete_older_than(
        &self,
        collection: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<usize, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };

        let before = docs.len();
        docs.retain(|_, record| match record_timestamp(record) {
            Some(ts) => ts >= cutoff,
            None => true,
        });
        let removed = before - docs.len();

        debug!("Removed {} records from {}", removed, collection);
        Ok(removed)
    }
}
