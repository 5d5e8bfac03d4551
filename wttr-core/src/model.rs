use serde::{Deserialize, Serialize};

/// A single fetch request: where, and in which language the service
/// should localize its description strings.
#[derive(Debug, Clone)]
pub struct WeatherRequest {
    /// Free-text place name, forwarded to the service verbatim.
    /// The service is the sole authority on interpretation.
    pub location: String,
    /// Language code, e.g. "ru". Selects the `lang_<code>` description array.
    pub lang: String,
}

/// Current conditions extracted from `current_condition[0]`.
///
/// All fields are kept as the strings the service sent; no numeric
/// parsing and no unit conversion happen anywhere in this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub temperature_c: String,
    pub description: String,
    pub windspeed_kmph: String,
    pub humidity_pct: String,
    pub pressure_mbar: String,
    pub visibility_km: String,
}
