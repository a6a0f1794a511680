//! Open-Meteo adapter.

use async_trait::async_trait;
use serde::Deserialize;

use super::{HttpClient, ProviderError, WeatherProvider};
use crate::cache::Category;
use crate::models::{Coordinates, WeatherData};

const CURRENT_FIELDS: &str = "temperature_2m,precipitation";

/// Client for `GET {base}/v1/forecast` current conditions.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: HttpClient,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temperature_2m: f64,
    precipitation: f64,
}

impl OpenMeteoClient {
    pub fn new(http: HttpClient, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    async fn current_weather(&self, at: Coordinates) -> Result<WeatherData, ProviderError> {
        let url = format!("{}/v1/forecast", self.base_url);
        let query = [
            ("latitude", format!("{:.4}", at.latitude)),
            ("longitude", format!("{:.4}", at.longitude)),
            ("current", CURRENT_FIELDS.to_string()),
        ];

        let forecast: ForecastResponse = self
            .http
            .get_json(&url, &query)
            .await
            .map_err(|e| ProviderError::new(Category::Weather, e))?;

        Ok(WeatherData {
            temperature: forecast.current.temperature_2m,
            precipitation: forecast.current.precipitation,
        })
    }

    async fn check(&self) -> u16 {
        let url = format!(
            "{}/v1/forecast?latitude=60&longitude=10&current=temperature_2m",
            self.base_url
        );
        self.http.status_of(&url).await
    }
}
