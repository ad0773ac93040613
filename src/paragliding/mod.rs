//! Paragliding module
//!
//! Turns raw hourly observations into paragliding ratings:
//! - Wind analysis (compass math, wind gradient, orographic lift)
//! - Thermal, CAPE and cloudbase estimation
//! - Flyability and cross-country scoring
//! - Daily and multi-day aggregation
//!
//! Every function here is pure and takes the tuning snapshot explicitly.

pub mod forecast;
pub mod metrics;
pub mod ratings;
pub mod scoring;
pub mod thermal;
pub mod wind_analysis;

// Re-export commonly used items from submodules
pub use forecast::{ForecastOptions, build_site_forecast, summarize_day};
pub use metrics::compute_hourly_metrics;
pub use ratings::{CapeRating, GradientRating, OrographicLift, ThermalRating, XcPotential};
pub use scoring::{flyability_score, xc_potential};
pub use thermal::{cape_rating, cloudbase_ft, cloudbase_label, lapse_rate, thermal_rating};
pub use wind_analysis::{angle_diff, compass, distance_from_range, in_range, orographic_lift, wind_gradient};
