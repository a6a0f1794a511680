//! Webhook notifier: POSTs event payloads to matching subscriptions.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::{DeliveryReport, Event, Notifier};
use crate::models::{current_timestamp, Webhook};
use crate::providers::HttpClient;
use crate::registry::WebhookStore;

/// Body POSTed to each subscriber.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookPayload {
    /// ID of the subscription being notified
    pub id: String,
    pub country: String,
    pub event: Event,
    pub time: String,
}

/// Notifier delivering over HTTP, one independent attempt per subscriber.
#[derive(Clone)]
pub struct WebhookNotifier {
    webhooks: Arc<dyn WebhookStore>,
    http: HttpClient,
}

impl WebhookNotifier {
    pub fn new(webhooks: Arc<dyn WebhookStore>, http: HttpClient) -> Self {
        Self { webhooks, http }
    }
}

async fn deliver(http: HttpClient, hook: Webhook, payload: WebhookPayload) -> bool {
    debug!("Sending {} webhook to {}", payload.event, hook.url);

    match http.post_json(&hook.url, &payload).await {
        Ok(status) if status.is_success() => {
            debug!("Webhook {} answered {}", hook.id, status);
            true
        }
        Ok(status) => {
            warn!("Webhook {} answered {}", hook.id, status);
            false
        }
        Err(e) => {
            warn!("Failed to send webhook {}: {}", hook.id, e);
            false
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, event: Event, country: &str) -> DeliveryReport {
        let hooks = match self.webhooks.matching(event.as_str(), country).await {
            Ok(hooks) => hooks,
            Err(e) => {
                warn!("Failed to look up webhooks for {} in {}: {}", event, country, e);
                return DeliveryReport::default();
            }
        };

        info!("Found {} webhooks for {} in {}", hooks.len(), event, country);

        let matched = hooks.len();
        let time = current_timestamp();
        let mut deliveries = JoinSet::new();
        for hook in hooks {
            let payload = WebhookPayload {
                id: hook.id.clone(),
                country: country.to_string(),
                event,
                time: time.clone(),
            };
            deliveries.spawn(deliver(self.http.clone(), hook, payload));
        }

        let mut delivered = 0;
        while let Some(result) = deliveries.join_next().await {
            match result {
                Ok(true) => delivered += 1,
                Ok(false) => {}
                Err(e) => warn!("Webhook delivery task failed: {}", e),
            }
        }

        DeliveryReport { matched, delivered }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MemoryWebhookStore;
    use httpmock::MockServer;
    use serde_json::json;
    use std::time::Duration;

    fn hook(id: &str, url: String, event: &str, country: &str) -> Webhook {
        Webhook {
            id: id.to_string(),
            url,
            event: event.to_string(),
            country: country.to_string(),
        }
    }

    async fn notifier(hooks: Vec<Webhook>) -> WebhookNotifier {
        let store = MemoryWebhookStore::new();
        for h in hooks {
            store.insert(h).await;
        }
        let http = HttpClient::new(Duration::from_secs(2)).unwrap();
        WebhookNotifier::new(Arc::new(store), http)
    }

    #[test]
    fn test_payload_shape() {
        let payload = WebhookPayload {
            id: "w1".to_string(),
            country: "NO".to_string(),
            event: Event::LowTemp,
            time: "20250101 10:00".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"id": "w1", "country": "NO", "event": "LOW_TEMP", "time": "20250101 10:00"})
        );
    }

    #[tokio::test]
    async fn test_posts_to_matching_subscribers_only() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/hooks/low");
                then.status(200);
            })
            .await;

        let notifier = notifier(vec![
            hook("w1", server.url("/hooks/low"), "LOW_TEMP", "NO"),
            hook("w2", server.url("/hooks/other"), "INVOKE", "NO"),
        ])
        .await;

        let report = notifier.notify(Event::LowTemp, "NO").await;

        mock.assert_async().await;
        assert_eq!(report, DeliveryReport { matched: 1, delivered: 1 });
    }

    #[tokio::test]
    async fn test_unreachable_subscriber_does_not_block_others() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/hooks/ok");
                then.status(200).json_body(json!({"ok": true}));
            })
            .await;

        let notifier = notifier(vec![
            // Nothing listens on port 9 (discard) in the test environment
            hook("dead", "http://127.0.0.1:9/hook".to_string(), "INVOKE", ""),
            hook("alive", server.url("/hooks/ok"), "INVOKE", "SE"),
        ])
        .await;

        let report = notifier.notify(Event::Invoke, "SE").await;

        mock.assert_async().await;
        assert_eq!(report, DeliveryReport { matched: 2, delivered: 1 });
    }

    #[tokio::test]
    async fn test_error_status_counts_as_undelivered() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("POST").path("/hooks/broken");
                then.status(500);
            })
            .await;

        let notifier = notifier(vec![hook("w1", server.url("/hooks/broken"), "INVOKE", "")]).await;

        let report = notifier.notify(Event::Invoke, "DK").await;

        assert_eq!(report, DeliveryReport { matched: 1, delivered: 0 });
    }

    #[tokio::test]
    async fn test_no_subscribers() {
        let notifier = notifier(Vec::new()).await;

        let report = notifier.notify(Event::Invoke, "NO").await;

        assert_eq!(report, DeliveryReport::default());
    }
}
