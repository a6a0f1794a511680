//! Cache key derivation.
//!
//! Pure functions turning domain inputs into document keys.

/// Joins the parts of composite keys.
pub const KEY_SEPARATOR: &str = "_";

/// Key for a country record: the ISO code, trimmed and upper-cased.
pub fn country_key(iso_code: &str) -> String {
    iso_code.trim().to_uppercase()
}

/// Key for a weather reading.
///
/// Coordinates are rounded to one decimal, so every point inside the same
/// 0.1° cell shares one cached reading.
pub fn weather_key(latitude: f64, longitude: f64) -> String {
    format!("{}{KEY_SEPARATOR}{}", cell(latitude), cell(longitude))
}

/// One coordinate rounded to a tenth, with `-0.0` folded into `0.0`.
fn cell(degrees: f64) -> String {
    let rounded = format!("{degrees:.1}");
    if rounded == "-0.0" {
        return "0.0".to_string();
    }
    rounded
}

/// Key for a set of exchange rates: the base code followed by the sorted targets.
pub fn currency_key<S: AsRef<str>>(base: &str, targets: &[S]) -> String {
    let mut sorted: Vec<&str> = targets.iter().map(AsRef::as_ref).collect();
    sorted.sort_unstable();

    let mut key = String::from(base);
    for target in sorted {
        key.push_str(KEY_SEPARATOR);
        key.push_str(target);
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_key_normalizes() {
        assert_eq!(country_key("  no "), "NO");
        assert_eq!(country_key("Se"), "SE");
    }

    #[test]
    fn test_weather_key_rounds_to_one_decimal() {
        assert_eq!(weather_key(59.91, 10.75), "59.9_10.8");
        assert_eq!(weather_key(-33.86, 151.21), "-33.9_151.2");
    }

    #[test]
    fn test_weather_key_has_no_negative_zero() {
        assert_eq!(weather_key(-0.04, 0.04), "0.0_0.0");
        assert_eq!(weather_key(-0.04, -0.04), weather_key(0.04, 0.04));
        assert_eq!(weather_key(-0.06, 0.0), "-0.1_0.0");
    }

    #[test]
    fn test_weather_key_buckets_nearby_points() {
        assert_eq!(weather_key(59.91, 10.76), weather_key(59.94, 10.79));
    }

    #[test]
    fn test_currency_key_ignores_target_order() {
        let key1 = currency_key("NOK", &["USD", "EUR", "SEK"]);
        let key2 = currency_key("NOK", &["SEK", "USD", "EUR"]);

        assert_eq!(key1, key2);
        assert_eq!(key1, "NOK_EUR_SEK_USD");
    }
}
