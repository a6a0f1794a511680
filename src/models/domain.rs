//! Domain types shared by the cache, providers and enrichment service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Exchange rates keyed by target currency code.
pub type ExchangeRates = BTreeMap<String, f64>;

// == Dashboard Config ==
/// A stored dashboard configuration. Read-only to this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfig {
    pub id: String,
    pub country: String,
    pub iso_code: String,
    #[serde(default)]
    pub features: FeatureConfig,
    #[serde(default)]
    pub last_change: String,
}

/// Which values a dashboard wants populated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureConfig {
    pub temperature: bool,
    pub precipitation: bool,
    pub capital: bool,
    pub coordinates: bool,
    pub population: bool,
    pub area: bool,
    /// Currency codes to quote against the country's own currency
    pub target_currencies: Vec<String>,
}

impl FeatureConfig {
    /// True if any field of the country record is shown.
    pub fn wants_country(&self) -> bool {
        self.capital || self.coordinates || self.population || self.area
    }

    /// True if any weather value is shown.
    pub fn wants_weather(&self) -> bool {
        self.temperature || self.precipitation
    }

    /// True if exchange rates are shown.
    pub fn wants_currency(&self) -> bool {
        !self.target_currencies.is_empty()
    }

    /// True if the country record has to be resolved, either for display or
    /// because weather and currency lookups are derived from it.
    pub fn needs_country(&self) -> bool {
        self.wants_country() || self.wants_weather() || self.wants_currency()
    }
}

// == Country ==
/// Country record as returned by REST Countries, and as cached.
///
/// `name`, `latlng`, `population` and `area` are always present upstream, so a
/// record missing any of them is rejected rather than zero-filled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryInfo {
    pub name: CountryName,
    /// Some territories have no capital
    #[serde(default)]
    pub capital: Vec<String>,
    pub latlng: Vec<f64>,
    pub population: u64,
    pub area: f64,
    /// Empty for territories without a currency of their own
    #[serde(default)]
    pub currencies: BTreeMap<String, CurrencyDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryName {
    pub common: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrencyDetails {
    pub name: String,
    #[serde(default)]
    pub symbol: String,
}

impl CountryInfo {
    /// The first listed capital, if any.
    pub fn capital_city(&self) -> Option<&str> {
        self.capital.first().map(String::as_str)
    }

    /// Coordinates, present only when the record holds exactly a `[lat, lng]` pair.
    pub fn coordinates(&self) -> Option<Coordinates> {
        match self.latlng.as_slice() {
            [latitude, longitude] => Some(Coordinates {
                latitude: *latitude,
                longitude: *longitude,
            }),
            _ => None,
        }
    }

    /// Currency used as the base for exchange rates.
    ///
    /// Countries with several currencies use the alphabetically first code.
    pub fn base_currency(&self) -> Option<&str> {
        self.currencies.keys().next().map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

// == Weather ==
/// Current weather at a location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    /// Degrees Celsius at 2m
    pub temperature: f64,
    /// Millimetres
    pub precipitation: f64,
}

// == Webhook ==
/// A notification subscription.
///
/// An empty `country` subscribes to the event for every country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Webhook {
    pub id: String,
    pub url: String,
    pub event: String,
    #[serde(default)]
    pub country: String,
}

impl Webhook {
    /// True if this subscription wants `event` for `country`.
    ///
    /// Countries compare case-insensitively, as ISO codes.
    pub fn matches(&self, event: &str, country: &str) -> bool {
        self.event == event
            && (self.country.is_empty() || self.country.eq_ignore_ascii_case(country.trim()))
    }
}
