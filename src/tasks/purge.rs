//! Cache Purge Task
//!
//! Background task that periodically deletes cache entries older than
//! their category TTL.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::cache::{Category, TtlCache};

/// Outcome of one purge cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurgeReport {
    /// Entries deleted, per category that was purged successfully
    pub removed: Vec<(Category, usize)>,
    /// Categories whose purge failed
    pub failed: Vec<Category>,
}

impl PurgeReport {
    /// Entries deleted across all categories.
    pub fn total(&self) -> usize {
        self.removed.iter().map(|(_, n)| n).sum()
    }
}

/// Purges every category once.
///
/// A failing category is logged and does not stop the others.
pub async fn purge_once(cache: &TtlCache) -> PurgeReport {
    let mut report = PurgeReport::default();

    for category in Category::ALL {
        match cache.purge_expired(category).await {
            Ok(removed) => {
                if removed > 0 {
                    info!("Cache purge: removed {} expired {} entries", removed, category);
                } else {
                    debug!("Cache purge: no expired {} entries found", category);
                }
                report.removed.push((category, removed));
            }
            Err(e) => {
                warn!("Cache purge for {} failed: {}", category, e);
                report.failed.push(category);
            }
        }
    }

    report
}

/// Spawns a task that purges the cache right away and then every `interval`.
///
/// The task exits once `shutdown` carries `true` or its sender is dropped.
pub fn spawn_purge_task(
    cache: Arc<TtlCache>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    let interval = if interval.is_zero() {
        Duration::from_secs(1)
    } else {
        interval
    };

    tokio::spawn(async move {
        info!(
            "Starting cache purge task with interval of {} seconds",
            interval.as_secs()
        );

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    purge_once(&cache).await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Cache purge task stopping");
                        break;
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheEntry, DocumentStore, MemoryDocumentStore, StoreError};
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use serde_json::{json, Value};

    /// Memory store whose purge fails for the weather collection.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryDocumentStore,
    }

    #[async_trait]
    impl DocumentStore for FlakyStore {
        async fn write(&self, collection: &str, key: &str, record: Value) -> Result<(), StoreError> {
            self.inner.write(collection, key, record).await
        }

        async fn read(&self, collection: &str, key: &str) -> Result<Option<Value>, StoreError> {
            self.inner.read(collection, key).await
        }

        async fn delete_older_than(
            &self,
            collection: &str,
            cutoff: DateTime<Utc>,
        ) -> Result<usize, StoreError> {
            if collection == Category::Weather.collection() {
                return Err(StoreError::Read {
                    collection: collection.to_string(),
                    reason: "connection reset".to_string(),
                });
            }
            self.inner.delete_older_than(collection, cutoff).await
        }
    }

    async fn seed_stale(cache: &TtlCache, category: Category, key: &str) {
        let ttl = chrono::Duration::seconds(category.ttl().as_secs() as i64);
        let entry = CacheEntry::written_at(json!({"v": 1}), Utc::now() - ttl - chrono::Duration::minutes(1));
        cache.write_entry(category, key, &entry).await.unwrap();
    }

    #[tokio::test]
    async fn test_purge_once_removes_only_expired_entries() {
        let store = Arc::new(MemoryDocumentStore::new());
        let cache = TtlCache::new(store.clone());
        seed_stale(&cache, Category::Country, "NO").await;
        seed_stale(&cache, Category::Currency, "NOK_USD").await;
        cache.write(Category::Country, "SE", &json!({"v": 2})).await.unwrap();

        let report = purge_once(&cache).await;

        assert_eq!(report.total(), 2);
        assert!(report.failed.is_empty());
        assert_eq!(store.len("country_cache").await, 1);
        assert_eq!(store.len("currency_cache").await, 0);
    }

    #[tokio::test]
    async fn test_failing_category_does_not_stop_others() {
        let cache = TtlCache::new(Arc::new(FlakyStore::default()));
        seed_stale(&cache, Category::Currency, "NOK_USD").await;

        let report = purge_once(&cache).await;

        assert_eq!(report.failed, vec![Category::Weather]);
        assert_eq!(
            report.removed,
            vec![(Category::Country, 0), (Category::Currency, 1)]
        );
    }

    #[tokio::test]
    async fn test_purge_task_runs_immediately() {
        let store = Arc::new(MemoryDocumentStore::new());
        let cache = Arc::new(TtlCache::new(store.clone()));
        seed_stale(&cache, Category::Weather, "59.9_10.8").await;
        let (_tx, rx) = watch::channel(false);

        let handle = spawn_purge_task(cache, Duration::from_secs(3600), rx);
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(store.len("weather_cache").await, 0);
        handle.abort();
    }

    #[tokio::test]
    async fn test_purge_task_stops_on_shutdown() {
        let cache = Arc::new(TtlCache::new(Arc::new(MemoryDocumentStore::new())));
        let (tx, rx) = watch::channel(false);

        let handle = spawn_purge_task(cache, Duration::from_millis(50), rx);
        tx.send(true).unwrap();

        let joined = tokio::time::timeout(Duration::from_secs(2), handle).await;
        assert!(joined.is_ok(), "Task should stop after shutdown signal");
    }

    #[tokio::test]
    async fn test_purge_task_stops_when_sender_dropped() {
        let cache = Arc::new(TtlCache::new(Arc::new(MemoryDocumentStore::new())));
        let (tx, rx) = watch::channel(false);

        let handle = spawn_purge_task(cache, Duration::from_millis(50), rx);
        drop(tx);

        let joined = tokio::time::timeout(Duration::from_secs(2), handle).await;
        assert!(joined.is_ok(), "Task should stop once the sender is gone");
    }
}
