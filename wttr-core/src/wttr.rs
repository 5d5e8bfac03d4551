use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use crate::{
    error::FetchError,
    model::{WeatherReport, WeatherRequest},
};

/// Client for the wttr.in weather service.
///
/// One instance covers both endpoints: the `format=j1` JSON report and
/// the rendered PNG card. Requests use the default `reqwest` client
/// settings; there is no retry and no custom timeout.
#[derive(Debug, Clone)]
pub struct WttrClient {
    http: Client,
    base_url: Url,
}

impl WttrClient {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let url = Url::parse(base_url).map_err(|e| FetchError::Endpoint {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        if url.cannot_be_a_base() {
            return Err(FetchError::Endpoint {
                url: base_url.to_string(),
                reason: "URL cannot serve as a base".to_string(),
            });
        }

        Ok(Self {
            http: Client::new(),
            base_url: url,
        })
    }

    /// `{base}/{location}?format=j1&lang={lang}`, location percent-encoded
    /// as a single path segment.
    fn weather_url(&self, request: &WeatherRequest) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| self.endpoint_error())?
            .pop_if_empty()
            .push(&request.location);
        url.query_pairs_mut()
            .append_pair("format", "j1")
            .append_pair("lang", &request.lang);

        Ok(url)
    }

    /// `{base}/{location with spaces→'+'}.png?lang={lang}`. The `+` signs
    /// survive path-segment encoding; everything else unsafe is escaped.
    fn image_url(&self, request: &WeatherRequest) -> Result<Url, FetchError> {
        let segment = format!("{}.png", request.location.replace(' ', "+"));

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| self.endpoint_error())?
            .pop_if_empty()
            .push(&segment);
        url.query_pairs_mut().append_pair("lang", &request.lang);

        Ok(url)
    }

    fn endpoint_error(&self) -> FetchError {
        FetchError::Endpoint {
            url: self.base_url.to_string(),
            reason: "URL cannot serve as a base".to_string(),
        }
    }

    /// Fetch the current-conditions document for `request.location`.
    ///
    /// Returns the full decoded JSON body. Extraction is a separate step
    /// (`extract_report`) so the caller decides what happens between
    /// decoding and field access — in particular, when the payload file
    /// gets written.
    pub async fn fetch_current(&self, request: &WeatherRequest) -> Result<Value, FetchError> {
        let url = self.weather_url(request)?;
        debug!(%url, "requesting current weather");

        let res = self.http.get(url).send().await?;
        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                snippet: truncate_body(&body),
            });
        }

        let payload: Value = serde_json::from_str(&body)?;
        debug!(bytes = body.len(), "decoded weather payload");

        Ok(payload)
    }

    /// Fetch the rendered PNG card for `request.location`.
    ///
    /// The body is returned as-is; no image format validation.
    pub async fn fetch_image(&self, request: &WeatherRequest) -> Result<Vec<u8>, FetchError> {
        let url = self.image_url(request)?;
        debug!(%url, "requesting weather card");

        let res = self.http.get(url).send().await?;
        let status = res.status();

        if !status.is_success() {
            let body = res.text().await?;
            return Err(FetchError::Status {
                status,
                snippet: truncate_body(&body),
            });
        }

        let bytes = res.bytes().await?;
        debug!(bytes = bytes.len(), "received weather card");

        Ok(bytes.to_vec())
    }
}

#[derive(Debug, Deserialize)]
struct J1Response {
    current_condition: Vec<CurrentCondition>,
}

#[derive(Debug, Deserialize)]
struct CurrentCondition {
    #[serde(rename = "temp_C")]
    temp_c: String,
    #[serde(rename = "windspeedKmph")]
    windspeed_kmph: String,
    humidity: String,
    pressure: String,
    visibility: String,
    /// The service emits one `lang_<code>` array per requested language,
    /// so the key is only known at runtime.
    #[serde(flatten)]
    localized: BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct LocalizedValue {
    value: String,
}

/// Extract the six report fields from an already-fetched `j1` document.
///
/// Fields are taken verbatim from `current_condition[0]`; the description
/// comes from `lang_<lang>[0].value`. Failures name the missing key.
pub fn extract_report(payload: &Value, lang: &str) -> Result<WeatherReport, FetchError> {
    let parsed: J1Response = serde_json::from_value(payload.clone())?;

    let current = parsed
        .current_condition
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::MissingKey("current_condition[0]".to_string()))?;

    let lang_key = format!("lang_{lang}");
    let localized = current
        .localized
        .get(&lang_key)
        .ok_or_else(|| FetchError::MissingKey(format!("current_condition[0].{lang_key}")))?;

    let entries: Vec<LocalizedValue> = serde_json::from_value(localized.clone())?;
    let description = entries
        .into_iter()
        .next()
        .map(|e| e.value)
        .ok_or_else(|| FetchError::MissingKey(format!("current_condition[0].{lang_key}[0]")))?;

    Ok(WeatherReport {
        temperature_c: current.temp_c,
        description,
        windspeed_kmph: current.windspeed_kmph,
        humidity_pct: current.humidity,
        pressure_mbar: current.pressure,
        visibility_km: current.visibility,
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(location: &str) -> WeatherRequest {
        WeatherRequest {
            location: location.to_string(),
            lang: "ru".to_string(),
        }
    }

    fn sample_payload() -> Value {
        json!({
            "current_condition": [{
                "temp_C": "5",
                "windspeedKmph": "13",
                "humidity": "81",
                "pressure": "1015",
                "visibility": "10",
                "weatherCode": "122",
                "lang_ru": [{ "value": "Пасмурно" }]
            }],
            "nearest_area": [{ "areaName": [{ "value": "Moscow" }] }]
        })
    }

    #[test]
    fn weather_url_encodes_location_segment() {
        let client = WttrClient::new("https://wttr.in").unwrap();
        let url = client.weather_url(&request("New York")).unwrap();

        assert_eq!(url.path(), "/New%20York");
        assert_eq!(url.query(), Some("format=j1&lang=ru"));
    }

    #[test]
    fn image_url_joins_spaces_with_plus() {
        let client = WttrClient::new("https://wttr.in").unwrap();
        let url = client.image_url(&request("New York")).unwrap();

        assert_eq!(url.path(), "/New+York.png");
        assert_eq!(url.query(), Some("lang=ru"));
    }

    #[test]
    fn urls_escape_query_metacharacters_in_location() {
        let client = WttrClient::new("https://wttr.in").unwrap();
        let url = client.weather_url(&request("what?#where")).unwrap();

        // A raw '?' or '#' in the path would truncate the URL.
        assert_eq!(url.path(), "/what%3F%23where");
    }

    #[test]
    fn new_rejects_unparsable_base_url() {
        let err = WttrClient::new("not a url").unwrap_err();
        assert!(matches!(err, FetchError::Endpoint { .. }));
    }

    #[test]
    fn extract_report_takes_fields_verbatim() {
        let report = extract_report(&sample_payload(), "ru").unwrap();

        assert_eq!(report.temperature_c, "5");
        assert_eq!(report.description, "Пасмурно");
        assert_eq!(report.windspeed_kmph, "13");
        assert_eq!(report.humidity_pct, "81");
        assert_eq!(report.pressure_mbar, "1015");
        assert_eq!(report.visibility_km, "10");
    }

    #[test]
    fn extract_report_names_missing_field() {
        let mut payload = sample_payload();
        payload["current_condition"][0]
            .as_object_mut()
            .unwrap()
            .remove("temp_C");

        let err = extract_report(&payload, "ru").unwrap_err();
        assert!(err.to_string().contains("temp_C"), "got: {err}");
    }

    #[test]
    fn extract_report_rejects_empty_current_condition() {
        let payload = json!({ "current_condition": [] });

        let err = extract_report(&payload, "ru").unwrap_err();
        assert!(matches!(err, FetchError::MissingKey(ref key) if key == "current_condition[0]"));
    }

    #[test]
    fn extract_report_names_missing_language_entry() {
        let err = extract_report(&sample_payload(), "de").unwrap_err();
        assert!(matches!(
            err,
            FetchError::MissingKey(ref key) if key == "current_condition[0].lang_de"
        ));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "П".repeat(300);
        let snippet = truncate_body(&long);

        assert!(snippet.ends_with("..."));
        assert_eq!(snippet.chars().count(), 203);
    }
}
