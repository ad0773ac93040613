//! Wind Analysis for Paragliding Sites
//!
//! Circular direction math plus the two wind-driven estimators: the wind
//! gradient between the surface and flyable altitudes, and orographic lift
//! from wind striking the slope face.

use crate::config::TuningConfig;
use crate::models::PressureLevel;
use crate::paragliding::{GradientRating, OrographicLift};

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW", "NNW",
];

/// Highest and lowest pressure levels a paraglider can realistically reach (~0-1500m)
const FLYABLE_PRESSURE_HPA: std::ops::RangeInclusive<u16> = 850..=1000;

/// Convert degrees to a 16-point compass label; any input is accepted
#[must_use]
pub fn compass(deg: f64) -> &'static str {
    let idx = ((deg / 22.5).round() as i64).rem_euclid(16);
    COMPASS_POINTS[idx as usize]
}

/// Circular difference between two directions, always in `[0, 180]`
#[must_use]
pub fn angle_diff(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs();
    if diff > 180.0 { 360.0 - diff } else { diff }
}

/// Check if a direction is within `[min, max]`, wrapping through north when `min > max`
///
/// The direction is truncated to a whole degree before comparison.
#[must_use]
pub fn in_range(dir: f64, min: u16, max: u16) -> bool {
    let d = (dir as i64) % 360;
    let (min, max) = (i64::from(min), i64::from(max));
    if min <= max {
        d >= min && d <= max
    } else {
        d >= min || d <= max
    }
}

/// Angular distance to the nearest edge of `[min, max]`, 0 when inside
#[must_use]
pub fn distance_from_range(dir: f64, min: u16, max: u16) -> f64 {
    if in_range(dir, min, max) {
        return 0.0;
    }
    angle_diff(dir, f64::from(min)).min(angle_diff(dir, f64::from(max)))
}

/// Wind speed increase from the surface to the windiest flyable level
///
/// Only levels between 850 and 1000 hPa are considered; 700 hPa sits in
/// permanently windy air and would dominate the result. The diff is never
/// negative.
#[must_use]
pub fn wind_gradient(surface: f64, levels: &[PressureLevel], tc: &TuningConfig) -> (f64, GradientRating) {
    let max_upper = levels
        .iter()
        .filter(|l| FLYABLE_PRESSURE_HPA.contains(&l.pressure))
        .map(|l| l.wind_speed)
        .fold(surface, f64::max);
    let diff = (max_upper - surface).max(0.0);

    let rating = if diff < tc.gradient.low_threshold {
        GradientRating::Low
    } else if diff < tc.gradient.high_threshold {
        GradientRating::Medium
    } else {
        GradientRating::High
    };
    (diff, rating)
}

/// Rate ridge lift from how squarely the wind hits the slope
#[must_use]
pub fn orographic_lift(wind_dir: f64, wind_speed: f64, aspect: u16, tc: &TuningConfig) -> OrographicLift {
    let oro = &tc.orographic;
    if wind_speed < oro.min_wind_speed {
        return OrographicLift::None;
    }

    match angle_diff(wind_dir, f64::from(aspect)) {
        d if d <= oro.strong_angle => OrographicLift::Strong,
        d if d <= oro.moderate_angle => OrographicLift::Moderate,
        d if d <= oro.weak_angle => OrographicLift::Weak,
        _ => OrographicLift::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn level(pressure: u16, wind_speed: f64) -> PressureLevel {
        PressureLevel {
            pressure,
            wind_speed,
            ..Default::default()
        }
    }

    #[rstest]
    #[case(0.0, "N")]
    #[case(22.5, "NNE")]
    #[case(45.0, "NE")]
    #[case(90.0, "E")]
    #[case(180.0, "S")]
    #[case(225.0, "SW")]
    #[case(270.0, "W")]
    #[case(337.5, "NNW")]
    #[case(360.0, "N")]
    #[case(11.24, "N")]
    #[case(11.26, "NNE")]
    #[case(-10.0, "N")]
    #[case(-90.0, "W")]
    fn test_compass(#[case] deg: f64, #[case] expected: &str) {
        assert_eq!(compass(deg), expected);
    }

    #[test]
    fn test_compass_is_periodic() {
        for deg in [0.0, 17.0, 123.4, 250.0, 349.0] {
            assert_eq!(compass(deg), compass(deg + 360.0));
            assert_eq!(compass(deg), compass(deg - 720.0));
        }
    }

    #[test]
    fn test_angle_diff() {
        assert_eq!(angle_diff(0.0, 0.0), 0.0);
        assert_eq!(angle_diff(0.0, 90.0), 90.0);
        assert_eq!(angle_diff(0.0, 180.0), 180.0);
        assert_eq!(angle_diff(0.0, 270.0), 90.0);
        assert_eq!(angle_diff(0.0, 350.0), 10.0);
        assert_eq!(angle_diff(10.0, 350.0), 20.0);
    }

    #[rstest]
    #[case(225.0, 210, 260, true)]
    #[case(200.0, 210, 260, false)]
    #[case(270.0, 210, 260, false)]
    #[case(350.0, 330, 30, true)]
    #[case(10.0, 330, 30, true)]
    #[case(180.0, 330, 30, false)]
    #[case(330.0, 330, 30, true)]
    #[case(30.0, 330, 30, true)]
    #[case(260.9, 210, 260, true)]
    fn test_in_range(#[case] dir: f64, #[case] min: u16, #[case] max: u16, #[case] expected: bool) {
        assert_eq!(in_range(dir, min, max), expected);
    }

    #[rstest]
    #[case(225.0, 210, 260, 0.0)]
    #[case(200.0, 210, 260, 10.0)]
    #[case(300.0, 210, 260, 40.0)]
    #[case(90.0, 210, 260, 120.0)]
    #[case(180.0, 330, 30, 150.0)]
    fn test_distance_from_range(#[case] dir: f64, #[case] min: u16, #[case] max: u16, #[case] expected: f64) {
        assert!((distance_from_range(dir, min, max) - expected).abs() < 1e-9);
    }

    #[rstest]
    #[case(12.0, vec![level(950, 14.0), level(900, 13.0), level(850, 15.0)], GradientRating::Low)]
    #[case(10.0, vec![level(950, 15.0), level(900, 22.0), level(850, 25.0)], GradientRating::Medium)]
    #[case(10.0, vec![level(950, 20.0), level(900, 30.0), level(850, 35.0)], GradientRating::High)]
    #[case(10.0, vec![level(950, 12.0), level(850, 14.0), level(700, 80.0)], GradientRating::Low)]
    #[case(10.0, vec![level(1000, 30.0), level(850, 12.0)], GradientRating::High)]
    fn test_wind_gradient(#[case] surface: f64, #[case] levels: Vec<PressureLevel>, #[case] expected: GradientRating) {
        let tc = TuningConfig::default();
        let (_, rating) = wind_gradient(surface, &levels, &tc);
        assert_eq!(rating, expected);
    }

    #[test]
    fn test_wind_gradient_never_negative() {
        let tc = TuningConfig::default();
        let (diff, rating) = wind_gradient(25.0, &[level(950, 10.0), level(850, 5.0)], &tc);
        assert_eq!(diff, 0.0);
        assert_eq!(rating, GradientRating::Low);

        let (diff, _) = wind_gradient(8.0, &[], &tc);
        assert_eq!(diff, 0.0);
    }

    #[test]
    fn test_wind_gradient_ignores_700_hpa() {
        let tc = TuningConfig::default();
        let levels = vec![level(950, 20.0), level(900, 30.0), level(850, 35.0)];
        let mut with_jet = levels.clone();
        with_jet.push(level(700, 80.0));

        assert_eq!(wind_gradient(10.0, &levels, &tc), wind_gradient(10.0, &with_jet, &tc));
    }

    #[rstest]
    #[case(225.0, 12.0, 225, OrographicLift::Strong)]
    #[case(240.0, 12.0, 225, OrographicLift::Strong)]
    #[case(260.0, 12.0, 225, OrographicLift::Weak)]
    #[case(280.0, 12.0, 225, OrographicLift::None)]
    #[case(45.0, 12.0, 225, OrographicLift::None)]
    #[case(225.0, 5.0, 225, OrographicLift::None)]
    #[case(350.0, 12.0, 10, OrographicLift::Moderate)]
    fn test_orographic_lift(
        #[case] dir: f64,
        #[case] speed: f64,
        #[case] aspect: u16,
        #[case] expected: OrographicLift,
    ) {
        let tc = TuningConfig::default();
        assert_eq!(orographic_lift(dir, speed, aspect, &tc), expected);
    }
}
