//! REST Countries adapter.

use async_trait::async_trait;
use tracing::debug;

use super::{CountryProvider, HttpClient, ProviderError};
use crate::cache::{country_key, Category};
use crate::models::CountryInfo;

/// Client for `GET {base}/alpha/{code}`.
#[derive(Debug, Clone)]
pub struct RestCountriesClient {
    http: HttpClient,
    base_url: String,
}

impl RestCountriesClient {
    pub fn new(http: HttpClient, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl CountryProvider for RestCountriesClient {
    async fn country(&self, iso_code: &str) -> Result<CountryInfo, ProviderError> {
        let code = country_key(iso_code);
        let url = format!("{}/alpha/{}", self.base_url, code);

        let countries: Vec<CountryInfo> = self
            .http
            .get_json(&url, &[])
            .await
            .map_err(|e| ProviderError::new(Category::Country, e))?;

        let country = countries.into_iter().next().ok_or_else(|| {
            ProviderError::new(Category::Country, format!("no country found for '{code}'"))
        })?;

        debug!("Fetched country {} ({})", code, country.name.common);
        Ok(country)
    }

    async fn check(&self) -> u16 {
        self.http.status_of(&format!("{}/alpha/no", self.base_url)).await
    }
}
