//! Composite flyability score and cross-country potential

use crate::config::TuningConfig;
use crate::models::{HourlyObservation, Site};
use crate::paragliding::wind_analysis::{distance_from_range, in_range};
use crate::paragliding::{GradientRating, ThermalRating, XcPotential};

/// Rate one hour from 1 (unflyable) to 5 (excellent)
///
/// Starts at `scoring.base_score`, accumulates signed adjustments for wind
/// speed, direction, gusts, gradient, rain and thermals, then rounds and
/// clamps to `1..=5`.
#[must_use]
pub fn flyability_score(
    obs: &HourlyObservation,
    site: &Site,
    gradient: GradientRating,
    thermal: ThermalRating,
    tc: &TuningConfig,
) -> u8 {
    let s = &tc.scoring;
    let wind = &tc.wind;
    let mut score = s.base_score;

    // Light wind below acceptable_min gets no adjustment
    let ws = obs.wind_speed;
    if ws >= wind.ideal_min && ws <= wind.ideal_max {
        score += s.wind_ideal_bonus;
    } else if ws >= wind.acceptable_min && ws <= wind.acceptable_max {
        score += s.wind_acceptable_bonus;
    } else if ws > wind.dangerous_max {
        score += s.wind_danger_penalty;
    } else if ws > wind.acceptable_max {
        score += s.wind_high_penalty;
    }

    if in_range(obs.wind_direction, site.wind_min, site.wind_max) {
        score += s.dir_on_bonus;
    } else {
        match distance_from_range(obs.wind_direction, site.wind_min, site.wind_max) {
            d if d > 90.0 => score += s.dir_off_penalty,
            d if d > 45.0 => score -= 1.0,
            d if d > 20.0 => score -= 0.5,
            _ => {}
        }
    }

    if ws > 0.0 {
        let gust_factor = obs.wind_gusts / ws;
        if gust_factor > wind.dangerous_gust_factor {
            score += s.gust_high_penalty;
        } else if gust_factor > wind.max_gust_factor {
            score += s.gust_med_penalty;
        }
    }

    match gradient {
        GradientRating::High => score += s.gradient_high_penalty,
        GradientRating::Medium => score += s.gradient_med_penalty,
        GradientRating::Low => {}
    }

    if obs.precipitation > 0.0 {
        score += s.rain_penalty;
    } else if obs.precipitation_probability > 50.0 {
        score += s.rain_prob_penalty;
    } else if obs.precipitation_probability > 30.0 {
        score -= 0.25;
    }

    if obs.cape >= tc.thermal.cape_moderate && obs.cape < tc.thermal.cape_extreme {
        score += s.cape_bonus;
    }
    if matches!(thermal, ThermalRating::Strong | ThermalRating::Moderate) {
        score += s.thermal_strong_bonus;
    }

    score.round().clamp(1.0, 5.0) as u8
}

/// Rate cross-country potential from CAPE, cloudbase, wind and thermals
///
/// `Extreme` thermals earn fewer points than `Strong` ones.
#[must_use]
pub fn xc_potential(
    cape: f64,
    cloudbase_ft: u32,
    wind_speed: f64,
    thermal: ThermalRating,
    tc: &TuningConfig,
) -> XcPotential {
    let xc = &tc.xc;
    let mut score = 0u32;

    if cape >= tc.thermal.cape_strong {
        score += 2;
    } else if cape >= tc.thermal.cape_moderate {
        score += 1;
    }

    if cloudbase_ft >= xc.good_cloudbase_ft {
        score += 2;
    } else if cloudbase_ft >= xc.min_cloudbase_ft {
        score += 1;
    }

    if wind_speed >= xc.min_wind_speed && wind_speed <= xc.max_wind_speed {
        score += 1;
    }

    score += match thermal {
        ThermalRating::Strong => 2,
        ThermalRating::Moderate | ThermalRating::Extreme => 1,
        ThermalRating::None | ThermalRating::Weak => 0,
    };

    if score >= xc.epic_threshold {
        XcPotential::Epic
    } else if score >= xc.high_threshold {
        XcPotential::High
    } else if score >= xc.medium_threshold {
        XcPotential::Medium
    } else {
        XcPotential::Low
    }
}
