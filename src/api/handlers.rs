//! API Handlers
//!
//! HTTP request handlers for each dashboard endpoint.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::warn;

use crate::cache::TtlCache;
use crate::enrichment::EnrichmentService;
use crate::error::{DashboardError, Result};
use crate::models::{CacheStatusResponse, EnrichedDashboard, HealthResponse, StatusResponse};
use crate::notify::Notifier;
use crate::providers::Providers;
use crate::registry::{ConfigStore, WebhookStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Read path for populated dashboards
    pub service: EnrichmentService,
    /// Shared provider cache, also driven by the purge task
    pub cache: Arc<TtlCache>,
    /// Upstream adapters, checked by the status endpoint
    pub providers: Providers,
    pub configs: Arc<dyn ConfigStore>,
    pub webhooks: Arc<dyn WebhookStore>,
    /// When the server came up, for the status uptime
    pub started_at: Instant,
}

impl AppState {
    /// Wires the enrichment service over the given stores and adapters.
    pub fn new(
        cache: Arc<TtlCache>,
        providers: Providers,
        configs: Arc<dyn ConfigStore>,
        webhooks: Arc<dyn WebhookStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let service = EnrichmentService::new(
            configs.clone(),
            cache.clone(),
            providers.clone(),
            notifier,
        );
        Self {
            service,
            cache,
            providers,
            configs,
            webhooks,
            started_at: Instant::now(),
        }
    }
}

/// Handler for GET /dashboard/v1/dashboards/:id
///
/// Returns the dashboard populated with current provider data.
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EnrichedDashboard>> {
    let dashboard = state.service.enrich_one(&id).await?;
    Ok(Json(dashboard))
}

/// Handler for GET /dashboard/v1/dashboards
///
/// Returns every stored dashboard populated, or the first failure.
pub async fn dashboards_handler(State(state): State<AppState>) -> Result<Json<Vec<EnrichedDashboard>>> {
    let dashboards = state.service.enrich_all().await?;
    Ok(Json(dashboards))
}

/// Handler for GET /dashboard/v1/status
///
/// Reports upstream availability, registry sizes, uptime and cache counters.
pub async fn status_handler(State(state): State<AppState>) -> Result<Json<StatusResponse>> {
    let providers = &state.providers;
    let (countries_api, meteo_api, currency_api) = tokio::join!(
        providers.country.check(),
        providers.weather.check(),
        providers.currency.check()
    );

    let dashboards = state
        .configs
        .list()
        .await
        .map_err(|e| DashboardError::ConfigStore(e.to_string()))?
        .len();

    let (notification_db, webhooks) = match state.webhooks.count().await {
        Ok(count) => (StatusCode::OK.as_u16(), count),
        Err(e) => {
            warn!("Webhook store unavailable: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE.as_u16(), 0)
        }
    };

    Ok(Json(StatusResponse {
        countries_api,
        meteo_api,
        currency_api,
        notification_db,
        version: "v1".to_string(),
        uptime: state.started_at.elapsed().as_secs(),
        dashboards,
        webhooks,
        cache: CacheStatusResponse::from(state.cache.stats()),
    }))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryDocumentStore;
    use crate::config::Config;
    use crate::models::{DashboardConfig, FeatureConfig, Webhook};
    use crate::notify::WebhookNotifier;
    use crate::providers::HttpClient;
    use crate::registry::{MemoryConfigStore, MemoryWebhookStore};
    use std::time::Duration;

    /// State whose providers all point at a closed local port.
    async fn state_with(features: FeatureConfig) -> AppState {
        let config = Config {
            countries_api_url: "http://127.0.0.1:9".to_string(),
            weather_api_url: "http://127.0.0.1:9".to_string(),
            currency_api_url: "http://127.0.0.1:9".to_string(),
            ..Config::default()
        };
        let http = HttpClient::new(Duration::from_secs(2)).unwrap();

        let configs = Arc::new(MemoryConfigStore::new());
        configs
            .insert(DashboardConfig {
                id: "d1".to_string(),
                country: "Norway".to_string(),
                iso_code: "NO".to_string(),
                features,
                last_change: String::new(),
            })
            .await;
        let webhooks = Arc::new(MemoryWebhookStore::new());
        webhooks
            .insert(Webhook {
                id: "w1".to_string(),
                url: "http://127.0.0.1:9/hook".to_string(),
                event: "INVOKE".to_string(),
                country: String::new(),
            })
            .await;

        let notifier = Arc::new(WebhookNotifier::new(webhooks.clone(), http.clone()));
        AppState::new(
            Arc::new(TtlCache::new(Arc::new(MemoryDocumentStore::new()))),
            Providers::from_config(&config, http),
            configs,
            webhooks,
            notifier,
        )
    }

    #[tokio::test]
    async fn test_dashboard_handler_without_features() {
        let state = state_with(FeatureConfig::default()).await;

        let Json(dashboard) = dashboard_handler(State(state), Path("d1".to_string()))
            .await
            .unwrap();

        assert_eq!(dashboard.country, "Norway");
        assert_eq!(dashboard.iso_code, "NO");
        assert!(dashboard.features.capital.is_none());
    }

    #[tokio::test]
    async fn test_dashboard_handler_unknown_id() {
        let state = state_with(FeatureConfig::default()).await;

        let result = dashboard_handler(State(state), Path("missing".to_string())).await;

        assert!(matches!(result, Err(DashboardError::ConfigNotFound(_))));
    }

    #[tokio::test]
    async fn test_dashboard_handler_provider_down() {
        let state = state_with(FeatureConfig {
            capital: true,
            ..Default::default()
        })
        .await;

        let result = dashboard_handler(State(state), Path("d1".to_string())).await;

        assert!(matches!(result, Err(DashboardError::Provider(_))));
    }

    #[tokio::test]
    async fn test_status_handler_counts() {
        let state = state_with(FeatureConfig::default()).await;

        let Json(status) = status_handler(State(state)).await.unwrap();

        assert_eq!(status.version, "v1");
        assert_eq!(status.countries_api, 503);
        assert_eq!(status.meteo_api, 503);
        assert_eq!(status.currency_api, 503);
        assert_eq!(status.notification_db, 200);
        assert_eq!(status.dashboards, 1);
        assert_eq!(status.webhooks, 1);
        assert_eq!(status.cache.stats.hits, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
