//! Thermal, CAPE and cloudbase estimators

use crate::config::TuningConfig;
use crate::models::PressureLevel;
use crate::paragliding::{CapeRating, ThermalRating};

/// Standard atmosphere lapse rate in °C/km, used when the profile is incomplete
pub const STANDARD_LAPSE_RATE: f64 = 6.5;

/// Lapse rate above which the atmosphere is considered very unstable
const STRONG_LAPSE_RATE: f64 = 9.0;

/// Temperature/dewpoint spread per 1000ft of cloudbase
const SPREAD_PER_1000FT: f64 = 2.5;

/// Lapse rate between 925 and 700 hPa in °C/km
#[must_use]
pub fn lapse_rate(levels: &[PressureLevel]) -> f64 {
    let find = |pressure: u16| levels.iter().find(|l| l.pressure == pressure);

    match (find(925), find(700)) {
        (Some(low), Some(high)) if high.geopotential_height > low.geopotential_height => {
            (low.temperature - high.temperature) / ((high.geopotential_height - low.geopotential_height) / 1000.0)
        }
        _ => STANDARD_LAPSE_RATE,
    }
}

/// Estimate thermal strength from CAPE and the 925-700 hPa lapse rate
#[must_use]
pub fn thermal_rating(cape: f64, levels: &[PressureLevel], tc: &TuningConfig) -> ThermalRating {
    let th = &tc.thermal;
    let lapse = lapse_rate(levels);

    let mut score = if cape > th.cape_extreme {
        4
    } else if cape > th.cape_strong {
        3
    } else if cape > th.cape_moderate {
        2
    } else if cape > th.cape_weak {
        1
    } else {
        0
    };
    if lapse > th.lapse_rate_bonus {
        score += 1;
    }
    if lapse > STRONG_LAPSE_RATE {
        score += 1;
    }

    match score {
        5.. => ThermalRating::Extreme,
        4 => ThermalRating::Strong,
        3 => ThermalRating::Moderate,
        1..=2 => ThermalRating::Weak,
        _ => ThermalRating::None,
    }
}

#[must_use]
pub fn cape_rating(cape: f64, tc: &TuningConfig) -> CapeRating {
    let th = &tc.thermal;
    if cape >= th.cape_extreme {
        CapeRating::Overdevelopment
    } else if cape >= th.cape_strong {
        CapeRating::Strong
    } else if cape >= th.cape_moderate {
        CapeRating::Moderate
    } else {
        CapeRating::Weak
    }
}

/// Estimate cloudbase in feet from the surface temperature/dewpoint spread
///
/// Never below `cloudbase.min_realistic_ft`.
#[must_use]
pub fn cloudbase_ft(temperature: f64, dew_point: f64, tc: &TuningConfig) -> u32 {
    let spread = (temperature - dew_point).max(0.0);
    let ft = (spread / SPREAD_PER_1000FT * 1000.0) as u32;
    ft.max(tc.cloudbase.min_realistic_ft)
}

/// `"Fog"` at or below the realistic floor, otherwise e.g. `"3500ft"`
#[must_use]
pub fn cloudbase_label(ft: u32, tc: &TuningConfig) -> String {
    if ft <= tc.cloudbase.min_realistic_ft {
        "Fog".to_string()
    } else {
        format!("{ft}ft")
    }
}
