//! Enrichment Service
//!
//! Resolves dashboard configurations into populated dashboards, reading
//! through the TTL cache before asking any provider.

use std::future::Future;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use super::events::EventTrigger;
use crate::cache::{country_key, currency_key, weather_key, Category, TtlCache};
use crate::error::{DashboardError, Result};
use crate::models::{
    current_timestamp, CountryInfo, DashboardConfig, EnrichedDashboard, ExchangeRates,
    PopulatedFeatures, WeatherData,
};
use crate::notify::Notifier;
use crate::providers::{ProviderError, Providers};
use crate::registry::ConfigStore;

/// Orchestrates cache, providers and events for dashboard reads.
#[derive(Clone)]
pub struct EnrichmentService {
    configs: Arc<dyn ConfigStore>,
    cache: Arc<TtlCache>,
    providers: Providers,
    events: EventTrigger,
}

impl EnrichmentService {
    pub fn new(
        configs: Arc<dyn ConfigStore>,
        cache: Arc<TtlCache>,
        providers: Providers,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            configs,
            cache,
            providers,
            events: EventTrigger::new(notifier),
        }
    }

    // == Single Dashboard ==
    /// Populates the dashboard stored under `id` and fires its events.
    pub async fn enrich_one(&self, id: &str) -> Result<EnrichedDashboard> {
        let id = id.trim();
        if id.is_empty() {
            return Err(DashboardError::InvalidRequest(
                "dashboard ID must not be empty".to_string(),
            ));
        }

        let config = self
            .configs
            .get(id)
            .await
            .map_err(|e| DashboardError::ConfigStore(e.to_string()))?
            .ok_or_else(|| DashboardError::ConfigNotFound(id.to_string()))?;

        let dashboard = self.enrich(&config).await?;
        self.events.dispatch(&dashboard);

        info!("Populated dashboard {} for {}", config.id, config.iso_code);
        Ok(dashboard)
    }

    // == All Dashboards ==
    /// Populates every stored dashboard in store order.
    ///
    /// The first failure fails the whole batch. No events are fired.
    pub async fn enrich_all(&self) -> Result<Vec<EnrichedDashboard>> {
        let configs = self
            .configs
            .list()
            .await
            .map_err(|e| DashboardError::ConfigStore(e.to_string()))?;

        let mut dashboards = Vec::with_capacity(configs.len());
        for config in &configs {
            match self.enrich(config).await {
                Ok(dashboard) => dashboards.push(dashboard),
                Err(e) => {
                    warn!("Failed to populate dashboard {}: {}", config.id, e);
                    return Err(e);
                }
            }
        }

        info!("Populated {} dashboards", dashboards.len());
        Ok(dashboards)
    }

    // == Enrich ==
    /// Builds the populated view of one configuration.
    ///
    /// Only categories selected by the feature flags touch the cache or a
    /// provider. Weather and currency run concurrently once the country is
    /// known.
    pub async fn enrich(&self, config: &DashboardConfig) -> Result<EnrichedDashboard> {
        let features = &config.features;
        let mut populated = PopulatedFeatures::default();

        if features.needs_country() {
            let country = self.country(&config.iso_code).await?;

            if features.capital {
                populated.capital = country.capital_city().map(str::to_string);
            }
            if features.coordinates {
                populated.coordinates = country.coordinates();
            }
            if features.population {
                populated.population = Some(country.population);
            }
            if features.area {
                populated.area = Some(country.area);
            }

            let (weather, rates) = tokio::try_join!(
                self.weather(config, &country),
                self.rates(config, &country)
            )?;

            if let Some(weather) = weather {
                if features.temperature {
                    populated.temperature = Some(weather.temperature);
                }
                if features.precipitation {
                    populated.precipitation = Some(weather.precipitation);
                }
            }
            populated.target_currencies = rates;
        }

        Ok(EnrichedDashboard {
            country: config.country.clone(),
            iso_code: config.iso_code.clone(),
            features: populated,
            last_retrieval: current_timestamp(),
        })
    }

    // == Category Lookups ==
    async fn country(&self, iso_code: &str) -> Result<CountryInfo> {
        let key = country_key(iso_code);
        self.cached_or_fetch(Category::Country, &key, || {
            self.providers.country.country(iso_code)
        })
        .await
    }

    async fn weather(
        &self,
        config: &DashboardConfig,
        country: &CountryInfo,
    ) -> Result<Option<WeatherData>> {
        if !config.features.wants_weather() {
            return Ok(None);
        }

        let at = country.coordinates().ok_or_else(|| {
            ProviderError::new(
                Category::Weather,
                format!("no coordinates for country '{}'", config.iso_code),
            )
        })?;

        let key = weather_key(at.latitude, at.longitude);
        let weather = self
            .cached_or_fetch(Category::Weather, &key, || {
                self.providers.weather.current_weather(at)
            })
            .await?;
        Ok(Some(weather))
    }

    async fn rates(
        &self,
        config: &DashboardConfig,
        country: &CountryInfo,
    ) -> Result<Option<ExchangeRates>> {
        let targets = config.features.target_currencies.as_slice();
        if targets.is_empty() {
            return Ok(None);
        }

        let base = country
            .base_currency()
            .ok_or_else(|| DashboardError::NoBaseCurrency(config.iso_code.clone()))?;

        let key = currency_key(base, targets);
        let rates = self
            .cached_or_fetch(Category::Currency, &key, || {
                self.providers.currency.rates(base, targets)
            })
            .await?;
        Ok(Some(rates))
    }

    // == Cache-Aside ==
    /// Returns the fresh cached value under `key`, or fetches and stores it.
    ///
    /// A failed cache write is logged and the fetched value is still returned.
    async fn cached_or_fetch<T, F, Fut>(&self, category: Category, key: &str, fetch: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, ProviderError>>,
    {
        match self.cache.read::<T>(category, key, category.ttl()).await {
            Ok(value) => {
                debug!("{} cache hit for '{}'", category, key);
                return Ok(value);
            }
            Err(miss) => debug!("{} cache miss for '{}': {}", category, key, miss),
        }

        let value = fetch().await?;

        if let Err(e) = self.cache.write(category, key, &value).await {
            warn!("Failed to cache {} data: {}", category, e);
        }
        Ok(value)
    }
}
