//! Hourly weather observation model as supplied by the weather provider

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::PgForecastError;

/// Pressure levels requested for every hour, surface first
pub const PRESSURE_LEVELS_HPA: [u16; 6] = [1000, 950, 925, 900, 850, 700];

/// One vertical-profile sample at a fixed pressure level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PressureLevel {
    #[serde(rename = "pressure_hpa")]
    pub pressure: u16,
    pub wind_speed: f64,
    pub wind_direction: f64,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Geopotential height in meters
    pub geopotential_height: f64,
}

/// All weather fields for one forecast hour
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlyObservation {
    pub time: DateTime<Utc>,
    /// Temperature at 2m in Celsius
    #[serde(rename = "temperature_2m")]
    pub temperature: f64,
    #[serde(rename = "relative_humidity_2m")]
    pub relative_humidity: f64,
    #[serde(rename = "dew_point_2m")]
    pub dew_point: f64,
    /// Surface wind speed in the requested [`WindUnit`]
    #[serde(rename = "wind_speed_10m")]
    pub wind_speed: f64,
    #[serde(rename = "wind_direction_10m")]
    pub wind_direction: f64,
    #[serde(rename = "wind_gusts_10m")]
    pub wind_gusts: f64,
    pub cloud_cover: f64,
    pub cloud_cover_low: f64,
    pub cloud_cover_mid: f64,
    pub cloud_cover_high: f64,
    /// Convective available potential energy in J/kg
    pub cape: f64,
    pub shortwave_radiation: f64,
    /// Precipitation in mm
    pub precipitation: f64,
    /// Precipitation probability in percent
    pub precipitation_probability: f64,
    /// Freezing level in meters
    pub freezing_level_height: f64,
    pub is_day: bool,
    pub weather_code: i32,
    pub pressure_msl: f64,
    pub visibility: f64,
    pub pressure_levels: Vec<PressureLevel>,
}

/// Wind speed unit used for every speed in a forecast, thresholds included
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindUnit {
    #[default]
    Mph,
    #[serde(alias = "kmh")]
    Kph,
    #[serde(alias = "kn")]
    Knots,
    Ms,
}

impl WindUnit {
    /// Value of Open-Meteo's `wind_speed_unit` query parameter
    #[must_use]
    pub fn api_param(self) -> &'static str {
        match self {
            WindUnit::Mph => "mph",
            WindUnit::Kph => "kmh",
            WindUnit::Knots => "kn",
            WindUnit::Ms => "ms",
        }
    }
}

impl fmt::Display for WindUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindUnit::Mph => write!(f, "mph"),
            WindUnit::Kph => write!(f, "kph"),
            WindUnit::Knots => write!(f, "knots"),
            WindUnit::Ms => write!(f, "ms"),
        }
    }
}

impl FromStr for WindUnit {
    type Err = PgForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mph" => Ok(WindUnit::Mph),
            "kph" | "kmh" => Ok(WindUnit::Kph),
            "knots" | "kn" => Ok(WindUnit::Knots),
            "ms" => Ok(WindUnit::Ms),
            other => Err(PgForecastError::validation(format!(
                "unknown wind unit '{other}', expected mph, kph, knots or ms"
            ))),
        }
    }
}
