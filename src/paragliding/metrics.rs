//! Per-hour metrics orchestration

use crate::config::TuningConfig;
use crate::models::{HourlyMetrics, HourlyObservation, Site};
use crate::paragliding::scoring::{flyability_score, xc_potential};
use crate::paragliding::thermal::{cape_rating, cloudbase_ft, thermal_rating};
use crate::paragliding::wind_analysis::{compass, orographic_lift, wind_gradient};

const FEET_PER_METER: f64 = 3.28084;

/// Compute every paragliding metric for one observation
///
/// `time` is the observation time at UTC offset zero; callers that group by
/// local date replace it with the local offset.
#[must_use]
pub fn compute_hourly_metrics(obs: &HourlyObservation, site: &Site, tc: &TuningConfig) -> HourlyMetrics {
    let (gradient_diff, gradient) = wind_gradient(obs.wind_speed, &obs.pressure_levels, tc);
    let thermal = thermal_rating(obs.cape, &obs.pressure_levels, tc);
    let cloudbase = cloudbase_ft(obs.temperature, obs.dew_point, tc);

    HourlyMetrics {
        time: obs.time.fixed_offset(),
        wind_speed: obs.wind_speed,
        wind_direction: obs.wind_direction,
        wind_dir_str: compass(obs.wind_direction).to_string(),
        wind_gusts: obs.wind_gusts,
        wind_gradient: gradient,
        wind_gradient_diff: gradient_diff,
        thermal_rating: thermal,
        cape: obs.cape,
        cape_rating: cape_rating(obs.cape, tc),
        cloudbase_ft: cloudbase,
        cloud_cover: obs.cloud_cover,
        precipitation: obs.precipitation,
        precipitation_probability: obs.precipitation_probability,
        orographic_lift: orographic_lift(obs.wind_direction, obs.wind_speed, site.aspect, tc),
        flyability_score: flyability_score(obs, site, gradient, thermal, tc),
        xc_potential: xc_potential(obs.cape, cloudbase, obs.wind_speed, thermal, tc),
        freezing_level_ft: obs.freezing_level_height * FEET_PER_METER,
        is_day: obs.is_day,
        pressure_levels: obs.pressure_levels.clone(),
    }
}
