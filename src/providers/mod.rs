//! Provider Adapters
//!
//! Clients for the upstream country, weather and currency APIs. Each adapter
//! performs a single request and normalizes the answer; failures are
//! returned to the caller untouched, never retried here.

mod country;
mod currency;
mod http;
mod weather;

use std::fmt::Display;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::cache::Category;
use crate::config::Config;
use crate::models::{Coordinates, CountryInfo, ExchangeRates, WeatherData};

pub use country::RestCountriesClient;
pub use currency::FrankfurterClient;
pub use http::{FetchError, HttpClient};
pub use weather::OpenMeteoClient;

// == Provider Error ==
/// An upstream API could not be reached, refused the request, or answered
/// with something unusable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to fetch {category} data: {reason}")]
pub struct ProviderError {
    pub category: Category,
    pub reason: String,
}

impl ProviderError {
    pub fn new(category: Category, reason: impl Display) -> Self {
        Self {
            category,
            reason: reason.to_string(),
        }
    }
}

// == Provider Traits ==
#[async_trait]
pub trait CountryProvider: Send + Sync {
    /// Looks up a country by ISO 3166 code.
    async fn country(&self, iso_code: &str) -> Result<CountryInfo, ProviderError>;

    /// HTTP status of a request for a known country; 503 when unreachable.
    async fn check(&self) -> u16;
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current temperature and precipitation at a location.
    async fn current_weather(&self, at: Coordinates) -> Result<WeatherData, ProviderError>;

    /// HTTP status of a forecast request for a fixed location; 503 when unreachable.
    async fn check(&self) -> u16;
}

#[async_trait]
pub trait CurrencyProvider: Send + Sync {
    /// Latest rates from `base` to each of `targets`.
    async fn rates(&self, base: &str, targets: &[String]) -> Result<ExchangeRates, ProviderError>;

    /// HTTP status of a EUR to NOK rate request; 503 when unreachable.
    async fn check(&self) -> u16;
}

// == Providers ==
/// The three adapters the enrichment service draws from.
#[derive(Clone)]
pub struct Providers {
    pub country: Arc<dyn CountryProvider>,
    pub weather: Arc<dyn WeatherProvider>,
    pub currency: Arc<dyn CurrencyProvider>,
}

impl Providers {
    /// HTTP adapters for the public APIs configured in `config`, sharing one client.
    pub fn from_config(config: &Config, client: HttpClient) -> Self {
        Self {
            country: Arc::new(RestCountriesClient::new(
                client.clone(),
                &config.countries_api_url,
            )),
            weather: Arc::new(OpenMeteoClient::new(client.clone(), &config.weather_api_url)),
            currency: Arc::new(FrankfurterClient::new(client, &config.currency_api_url)),
        }
    }
}
