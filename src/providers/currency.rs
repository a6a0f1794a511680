//! Frankfurter exchange rate adapter.

use async_trait::async_trait;
use serde::Deserialize;

use super::{CurrencyProvider, HttpClient, ProviderError};
use crate::cache::Category;
use crate::models::ExchangeRates;

/// Client for `GET {base}/latest?from=..&to=..`.
#[derive(Debug, Clone)]
pub struct FrankfurterClient {
    http: HttpClient,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct LatestResponse {
    rates: ExchangeRates,
}

impl FrankfurterClient {
    pub fn new(http: HttpClient, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl CurrencyProvider for FrankfurterClient {
    async fn rates(&self, base: &str, targets: &[String]) -> Result<ExchangeRates, ProviderError> {
        if base.trim().is_empty() {
            return Err(ProviderError::new(Category::Currency, "no base currency"));
        }

        let url = format!("{}/latest", self.base_url);
        let query = [("from", base.to_string()), ("to", targets.join(","))];

        let latest: LatestResponse = self
            .http
            .get_json(&url, &query)
            .await
            .map_err(|e| ProviderError::new(Category::Currency, e))?;

        Ok(latest.rates)
    }

    async fn check(&self) -> u16 {
        let url = format!("{}/latest?from=EUR&to=NOK", self.base_url);
        self.http.status_of(&url).await
    }
}
