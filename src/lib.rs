//! `pgforecast` - Paragliding flight-condition forecasts
//!
//! This library turns hourly atmospheric forecasts for a launch site into
//! paragliding ratings (wind gradient, thermals, cloudbase, orographic lift,
//! flyability and cross-country potential) and rolls them up into daily and
//! multi-day summaries.

pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod paragliding;
pub mod paragliding_forecast;
pub mod weather;

// Re-export core types for public API
pub use config::{AppConfig, TuningConfig};
pub use error::PgForecastError;
pub use models::{
    DayForecast, DaySummary, HourlyMetrics, HourlyObservation, PressureLevel, Site, SiteForecast,
    WindUnit,
};
pub use paragliding::{
    CapeRating, ForecastOptions, GradientRating, OrographicLift, ThermalRating, XcPotential,
    build_site_forecast, compute_hourly_metrics,
};
pub use paragliding_forecast::ParaglidingForecastService;
pub use weather::{OpenMeteoClient, WeatherSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PgForecastError>;
