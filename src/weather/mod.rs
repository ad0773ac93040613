use anyhow::Result;

use crate::models::{HourlyObservation, Site, WindUnit};

pub mod open_meteo;

pub use open_meteo::{OpenMeteoClient, parse_open_meteo_json};

/// Forecast horizon requested from the weather provider, in days
pub const FORECAST_DAYS: u32 = 16;

/// Source of hourly observations for a site
///
/// Implementations own network access, parsing and timeouts; every
/// observation returned must be fully populated.
pub trait WeatherSource {
    async fn fetch_hourly(&self, site: &Site, units: WindUnit) -> Result<Vec<HourlyObservation>>;
}
