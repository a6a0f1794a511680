//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default REST Countries endpoint
pub const DEFAULT_COUNTRIES_API_URL: &str = "https://restcountries.com/v3.1";
/// Default Open-Meteo endpoint
pub const DEFAULT_WEATHER_API_URL: &str = "https://api.open-meteo.com";
/// Default Frankfurter endpoint
pub const DEFAULT_CURRENCY_API_URL: &str = "https://api.frankfurter.app";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Interval in seconds between cache purge cycles
    pub purge_interval: u64,
    /// Timeout in seconds for every outbound HTTP request
    pub http_timeout: u64,
    /// Base URL of the country provider
    pub countries_api_url: String,
    /// Base URL of the weather provider
    pub weather_api_url: String,
    /// Base URL of the currency provider
    pub currency_api_url: String,
    /// Optional JSON file with dashboards and webhooks to load at startup
    pub seed_file: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 8080)
    /// - `CACHE_PURGE_INTERVAL` - Purge frequency in seconds (default: 3600)
    /// - `HTTP_TIMEOUT` - Outbound request timeout in seconds (default: 10)
    /// - `COUNTRIES_API_URL`, `WEATHER_API_URL`, `CURRENCY_API_URL` - provider base URLs
    /// - `SEED_FILE` - seed data path (default: none)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("PORT").unwrap_or(defaults.server_port),
            purge_interval: parse_var("CACHE_PURGE_INTERVAL")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.purge_interval),
            http_timeout: parse_var("HTTP_TIMEOUT")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.http_timeout),
            countries_api_url: env::var("COUNTRIES_API_URL")
                .unwrap_or(defaults.countries_api_url),
            weather_api_url: env::var("WEATHER_API_URL").unwrap_or(defaults.weather_api_url),
            currency_api_url: env::var("CURRENCY_API_URL").unwrap_or(defaults.currency_api_url),
            seed_file: env::var("SEED_FILE")
                .ok()
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// Purge interval as a `Duration`.
    pub fn purge_interval(&self) -> Duration {
        Duration::from_secs(self.purge_interval)
    }

    /// Outbound request timeout as a `Duration`.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            purge_interval: 3600,
            http_timeout: 10,
            countries_api_url: DEFAULT_COUNTRIES_API_URL.to_string(),
            weather_api_url: DEFAULT_WEATHER_API_URL.to_string(),
            currency_api_url: DEFAULT_CURRENCY_API_URL.to_string(),
            seed_file: None,
        }
    }
}
