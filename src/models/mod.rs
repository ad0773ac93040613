//! Data models for pgforecast
//!
//! This module contains the domain models organized by concern:
//! - Site: launch site identity and geometry
//! - Weather: hourly observations and pressure-level samples as supplied by the weather provider
//! - Forecast: derived hourly metrics, day summaries and whole-site forecasts

pub mod forecast;
pub mod site;
pub mod weather;

// Re-export all public types for convenient access
pub use forecast::{DayForecast, DaySummary, HourlyMetrics, SiteForecast};
pub use site::{Site, SitesFile, find_site, load_sites};
pub use weather::{HourlyObservation, PRESSURE_LEVELS_HPA, PressureLevel, WindUnit};
