//! Open-Meteo forecast client
//!
//! Requests 16 days of hourly surface fields plus four fields at each of the
//! six pressure levels, all in UTC.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use anyhow::Context;
use chrono::NaiveDateTime;
use reqwest::Url;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::{FORECAST_DAYS, WeatherSource};
use crate::config::WeatherConfig;
use crate::models::{HourlyObservation, PRESSURE_LEVELS_HPA, PressureLevel, Site, WindUnit};
use crate::{PgForecastError, Result};

const SURFACE_PARAMS: [&str; 19] = [
    "temperature_2m",
    "relative_humidity_2m",
    "dew_point_2m",
    "wind_speed_10m",
    "wind_direction_10m",
    "wind_gusts_10m",
    "cloud_cover",
    "cloud_cover_low",
    "cloud_cover_mid",
    "cloud_cover_high",
    "cape",
    "shortwave_radiation",
    "precipitation",
    "precipitation_probability",
    "freezing_level_height",
    "is_day",
    "weather_code",
    "pressure_msl",
    "visibility",
];

const LEVEL_PARAMS: [&str; 4] = ["wind_speed", "wind_direction", "temperature", "geopotential_height"];

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Comma-separated `hourly` parameter list
fn hourly_params() -> String {
    let levels = PRESSURE_LEVELS_HPA
        .iter()
        .flat_map(|p| LEVEL_PARAMS.iter().map(move |name| format!("{name}_{p}hPa")));
    SURFACE_PARAMS
        .iter()
        .map(|s| (*s).to_string())
        .chain(levels)
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: Option<HourlySeries>,
}

#[derive(Debug, Deserialize)]
struct HourlySeries {
    time: Vec<String>,
    #[serde(flatten)]
    series: HashMap<String, Value>,
}

impl HourlySeries {
    /// Value of `key` at hour `i`; absent, null or non-numeric values read as 0
    fn value(&self, key: &str, i: usize) -> f64 {
        self.series
            .get(key)
            .and_then(Value::as_array)
            .and_then(|values| values.get(i))
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    }

    fn observation(&self, i: usize, time: chrono::DateTime<chrono::Utc>) -> HourlyObservation {
        let pressure_levels = PRESSURE_LEVELS_HPA
            .iter()
            .map(|&p| PressureLevel {
                pressure: p,
                wind_speed: self.value(&format!("wind_speed_{p}hPa"), i),
                wind_direction: self.value(&format!("wind_direction_{p}hPa"), i),
                temperature: self.value(&format!("temperature_{p}hPa"), i),
                geopotential_height: self.value(&format!("geopotential_height_{p}hPa"), i),
            })
            .collect();

        HourlyObservation {
            time,
            temperature: self.value("temperature_2m", i),
            relative_humidity: self.value("relative_humidity_2m", i),
            dew_point: self.value("dew_point_2m", i),
            wind_speed: self.value("wind_speed_10m", i),
            wind_direction: self.value("wind_direction_10m", i),
            wind_gusts: self.value("wind_gusts_10m", i),
            cloud_cover: self.value("cloud_cover", i),
            cloud_cover_low: self.value("cloud_cover_low", i),
            cloud_cover_mid: self.value("cloud_cover_mid", i),
            cloud_cover_high: self.value("cloud_cover_high", i),
            cape: self.value("cape", i),
            shortwave_radiation: self.value("shortwave_radiation", i),
            precipitation: self.value("precipitation", i),
            precipitation_probability: self.value("precipitation_probability", i),
            freezing_level_height: self.value("freezing_level_height", i),
            is_day: self.value("is_day", i) as i32 == 1,
            weather_code: self.value("weather_code", i) as i32,
            pressure_msl: self.value("pressure_msl", i),
            visibility: self.value("visibility", i),
            pressure_levels,
        }
    }
}

/// Parse a raw Open-Meteo forecast response into observations
pub fn parse_open_meteo_json(raw: &[u8]) -> Result<Vec<HourlyObservation>> {
    let response: ForecastResponse = serde_json::from_slice(raw)?;
    let hourly = response
        .hourly
        .ok_or_else(|| PgForecastError::api("No hourly data in Open-Meteo response"))?;

    hourly
        .time
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let time = NaiveDateTime::parse_from_str(t, TIME_FORMAT)
                .map_err(|e| PgForecastError::api(format!("Invalid hourly time '{t}': {e}")))?
                .and_utc();
            Ok(hourly.observation(i, time))
        })
        .collect()
}

/// Open-Meteo client with a bounded timeout and retried transient failures
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: ClientWithMiddleware,
    base_url: String,
    model: String,
}

impl OpenMeteoClient {
    /// Create a new client from the weather configuration
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("pgforecast/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PgForecastError::config(format!("Failed to create HTTP client: {e}")))?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    /// Full request URL for a site
    pub fn forecast_url(&self, site: &Site, units: WindUnit) -> Result<Url> {
        let mut params = vec![
            ("latitude", format!("{:.4}", site.lat)),
            ("longitude", format!("{:.4}", site.lon)),
            ("hourly", hourly_params()),
            ("wind_speed_unit", units.api_param().to_string()),
            ("forecast_days", FORECAST_DAYS.to_string()),
            ("timezone", "UTC".to_string()),
        ];
        if self.model != "auto" {
            params.push(("models", self.model.clone()));
        }

        Url::parse_with_params(&format!("{}/forecast", self.base_url), &params)
            .map_err(|e| PgForecastError::config(format!("Invalid weather API URL '{}': {e}", self.base_url)))
    }
}

impl WeatherSource for OpenMeteoClient {
    #[instrument(skip(self, site), fields(site = %site.name))]
    async fn fetch_hourly(&self, site: &Site, units: WindUnit) -> anyhow::Result<Vec<HourlyObservation>> {
        let url = self.forecast_url(site, units)?;
        debug!("Open-Meteo request URL: {}", url);

        let start_time = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch weather for {}", site.name))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read weather response for {}", site.name))?;

        if !status.is_success() {
            warn!("Open-Meteo returned {} for {}", status, site.name);
            return Err(PgForecastError::api(format!(
                "Open-Meteo returned {status}: {}",
                String::from_utf8_lossy(&body)
            ))
            .into());
        }

        let observations = parse_open_meteo_json(&body)
            .with_context(|| format!("Failed to parse weather response for {}", site.name))?;

        info!(
            "Fetched {} hourly observations for {} in {:.3}s",
            observations.len(),
            site.name,
            start_time.elapsed().as_secs_f64()
        );

        Ok(observations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "latitude": 50.62,
        "longitude": -2.36,
        "hourly_units": {"time": "iso8601", "temperature_2m": "°C"},
        "hourly": {
            "time": ["2026-02-19T08:00", "2026-02-19T09:00"],
            "temperature_2m": [10.0, 11.0],
            "relative_humidity_2m": [80.0, 75.0],
            "dew_point_2m": [7.0, 7.0],
            "wind_speed_10m": [12.0, 14.0],
            "wind_direction_10m": [225.0, 230.0],
            "wind_gusts_10m": [20.0, 22.0],
            "cloud_cover": [50.0, 60.0],
            "cloud_cover_low": [30.0, 40.0],
            "cloud_cover_mid": [10.0, 10.0],
            "cloud_cover_high": [10.0, 10.0],
            "cape": [100.0, 200.0],
            "shortwave_radiation": [300.0, 400.0],
            "precipitation": [0.0, 0.0],
            "precipitation_probability": [10.0, null],
            "freezing_level_height": [2000.0, 2100.0],
            "is_day": [1, 0],
            "weather_code": [2, 3],
            "pressure_msl": [1013.0, 1012.0],
            "visibility": [10000.0, 10000.0],
            "wind_speed_1000hPa": [13.0, 15.0],
            "wind_direction_1000hPa": [225.0, 230.0],
            "temperature_1000hPa": [9.0, 10.0],
            "geopotential_height_1000hPa": [100.0, 100.0],
            "wind_speed_950hPa": [16.0, 18.0],
            "wind_direction_950hPa": [230.0, 235.0],
            "temperature_950hPa": [7.0, 8.0],
            "geopotential_height_950hPa": [500.0, 500.0],
            "wind_speed_925hPa": [18.0, 20.0],
            "wind_direction_925hPa": [235.0, 240.0],
            "temperature_925hPa": [5.0, 6.0],
            "geopotential_height_925hPa": [750.0, 750.0],
            "wind_speed_900hPa": [20.0, 22.0],
            "wind_direction_900hPa": [240.0, 245.0],
            "temperature_900hPa": [3.0, 4.0],
            "geopotential_height_900hPa": [1000.0, 1000.0],
            "wind_speed_850hPa": [22.0, 25.0],
            "wind_direction_850hPa": [245.0, 250.0],
            "temperature_850hPa": [0.0, 1.0],
            "geopotential_height_850hPa": [1500.0, 1500.0],
            "wind_speed_700hPa": [40.0, 45.0],
            "wind_direction_700hPa": [260.0, 265.0],
            "temperature_700hPa": [-10.0, -9.0]
        }
    }"#;

    fn site() -> Site {
        Site {
            name: "Ringstead".to_string(),
            lat: 50.631_234,
            lon: -2.354_321,
            elevation: 147,
            wind_min: 210,
            wind_max: 260,
            best_dir: 225,
            aspect: 225,
        }
    }

    #[test]
    fn test_parse_open_meteo_json() {
        let data = parse_open_meteo_json(FIXTURE.as_bytes()).unwrap();
        assert_eq!(data.len(), 2);

        let h = &data[0];
        assert_eq!(h.time.to_rfc3339(), "2026-02-19T08:00:00+00:00");
        assert_eq!(h.temperature, 10.0);
        assert_eq!(h.wind_speed, 12.0);
        assert_eq!(h.cape, 100.0);
        assert!(h.is_day);
        assert_eq!(h.weather_code, 2);

        assert_eq!(h.pressure_levels.len(), 6);
        let pressures: Vec<u16> = h.pressure_levels.iter().map(|l| l.pressure).collect();
        assert_eq!(pressures, PRESSURE_LEVELS_HPA);
        let l850 = h.pressure_levels.iter().find(|l| l.pressure == 850).unwrap();
        assert_eq!(l850.wind_speed, 22.0);
        assert_eq!(l850.geopotential_height, 1500.0);
    }

    #[test]
    fn test_parse_missing_values_read_as_zero() {
        let data = parse_open_meteo_json(FIXTURE.as_bytes()).unwrap();
        let h = &data[1];

        assert_eq!(h.precipitation_probability, 0.0);
        assert!(!h.is_day);
        let l700 = h.pressure_levels.iter().find(|l| l.pressure == 700).unwrap();
        assert_eq!(l700.wind_speed, 45.0);
        assert_eq!(l700.geopotential_height, 0.0);
    }

    #[test]
    fn test_parse_rejects_missing_hourly() {
        let result = parse_open_meteo_json(br#"{"latitude": 50.0}"#);
        assert!(matches!(result, Err(PgForecastError::Api { .. })));

        assert!(parse_open_meteo_json(b"not json").is_err());
    }

    #[test]
    fn test_parse_rejects_bad_time() {
        let raw = br#"{"hourly": {"time": ["19/02/2026 08:00"], "temperature_2m": [10.0]}}"#;
        assert!(parse_open_meteo_json(raw).is_err());
    }

    #[test]
    fn test_hourly_params() {
        let params = hourly_params();
        let names: Vec<&str> = params.split(',').collect();

        assert_eq!(names.len(), 19 + 4 * 6);
        assert_eq!(names[0], "temperature_2m");
        assert!(names.contains(&"geopotential_height_925hPa"));
        assert!(names.contains(&"wind_speed_700hPa"));
    }

    #[test]
    fn test_forecast_url() {
        let client = OpenMeteoClient::new(&WeatherConfig::default()).unwrap();
        let url = client.forecast_url(&site(), WindUnit::Knots).unwrap();
        let query: HashMap<String, String> = url.query_pairs().into_owned().collect();

        assert!(url.path().ends_with("/forecast"));
        assert_eq!(query["latitude"], "50.6312");
        assert_eq!(query["longitude"], "-2.3543");
        assert_eq!(query["wind_speed_unit"], "kn");
        assert_eq!(query["forecast_days"], "16");
        assert_eq!(query["timezone"], "UTC");
        assert!(!query.contains_key("models"));
    }

    #[test]
    fn test_forecast_url_with_model() {
        let config = WeatherConfig {
            model: "ukmo_seamless".to_string(),
            base_url: "https://example.test/v1/".to_string(),
            ..Default::default()
        };
        let client = OpenMeteoClient::new(&config).unwrap();
        let url = client.forecast_url(&site(), WindUnit::Mph).unwrap();

        assert_eq!(url.path(), "/v1/forecast");
        assert!(url.query_pairs().any(|(k, v)| k == "models" && v == "ukmo_seamless"));
    }
}
