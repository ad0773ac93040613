//! Derived forecast records: hourly metrics, day summaries and site forecasts
//!
//! These structs are serialized field-for-field for the browser client, so
//! field names and units here are a wire contract.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::models::{PressureLevel, Site, WindUnit};
use crate::paragliding::{CapeRating, GradientRating, OrographicLift, ThermalRating, XcPotential};

/// Paragliding metrics computed for one forecast hour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyMetrics {
    pub time: DateTime<FixedOffset>,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub wind_dir_str: String,
    pub wind_gusts: f64,
    pub wind_gradient: GradientRating,
    pub wind_gradient_diff: f64,
    pub thermal_rating: ThermalRating,
    pub cape: f64,
    pub cape_rating: CapeRating,
    pub cloudbase_ft: u32,
    pub cloud_cover: f64,
    pub precipitation: f64,
    #[serde(rename = "precip_probability")]
    pub precipitation_probability: f64,
    pub orographic_lift: OrographicLift,
    /// 1 (unflyable) to 5 (excellent)
    pub flyability_score: u8,
    pub xc_potential: XcPotential,
    pub freezing_level_ft: f64,
    pub is_day: bool,
    pub pressure_levels: Vec<PressureLevel>,
}

/// Aggregated metrics for one calendar day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub avg_wind_speed: f64,
    #[serde(rename = "avg_wind_direction")]
    pub avg_wind_dir: f64,
    pub wind_dir_str: String,
    pub max_gusts: f64,
    pub thermal_rating: ThermalRating,
    pub max_precip_prob: f64,
    #[serde(rename = "avg_cloudbase_ft")]
    pub avg_cloudbase: u32,
    /// Rounded mean of the day's three best hourly scores
    pub best_score: u8,
    pub xc_potential: XcPotential,
}

/// Hour-by-hour forecast for one of the detailed days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayForecast {
    pub date: NaiveDate,
    pub hours: Vec<HourlyMetrics>,
    pub summary: DaySummary,
}

/// Complete forecast for one site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteForecast {
    pub site: Site,
    pub generated: DateTime<FixedOffset>,
    pub units: WindUnit,
    pub detailed_days: Vec<DayForecast>,
    pub extended_days: Vec<DaySummary>,
    /// e.g. `"Sat 13:00"`; the client expects an empty string when there is none
    #[serde(
        serialize_with = "serialize_best_window",
        deserialize_with = "deserialize_best_window"
    )]
    pub best_window: Option<String>,
}

fn serialize_best_window<S: Serializer>(
    window: &Option<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(window.as_deref().unwrap_or_default())
}

fn deserialize_best_window<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let window = Option::<String>::deserialize(deserializer)?;
    Ok(window.filter(|w| !w.is_empty()))
}
