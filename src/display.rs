//! Display metadata for wind-strength tiers and gradient severity
//!
//! Colors, icons and labels are presentation hints for renderers. They are
//! configured alongside the tuning thresholds but never feed into scoring.

use serde::{Deserialize, Serialize};

use crate::config::TuningConfig;
use crate::paragliding::GradientRating;

/// Color, icon and label for one display tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayStyle {
    pub rgb: String,
    pub icon: String,
    pub label: String,
}

impl DisplayStyle {
    fn new(rgb: &str, icon: &str, label: &str) -> Self {
        Self {
            rgb: rgb.to_string(),
            icon: icon.to_string(),
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindStrengthDisplay {
    pub light: DisplayStyle,
    pub moderate: DisplayStyle,
    pub fresh: DisplayStyle,
    pub strong: DisplayStyle,
    pub very_strong: DisplayStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientDisplay {
    pub low: DisplayStyle,
    pub medium: DisplayStyle,
    pub high: DisplayStyle,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub wind_strength: WindStrengthDisplay,
    pub gradient: GradientDisplay,
}

impl Default for WindStrengthDisplay {
    fn default() -> Self {
        Self {
            light: DisplayStyle::new("#4fd1c5", "💤", "Light"),
            moderate: DisplayStyle::new("#48bb78", "✅", "Moderate"),
            fresh: DisplayStyle::new("#ecc94b", "⚠️", "Fresh"),
            strong: DisplayStyle::new("#ed8936", "🟠", "Strong"),
            very_strong: DisplayStyle::new("#f56565", "🔴", "Very Strong"),
        }
    }
}

impl Default for GradientDisplay {
    fn default() -> Self {
        Self {
            low: DisplayStyle::new("#48bb78", "✅", "Low"),
            medium: DisplayStyle::new("#ecc94b", "⚠️", "Medium"),
            high: DisplayStyle::new("#f56565", "🔴", "High"),
        }
    }
}

impl TuningConfig {
    /// Display tier for a surface wind speed, banded by the wind thresholds
    #[must_use]
    pub fn wind_strength_tier_for(&self, speed: f64) -> &DisplayStyle {
        let tiers = &self.display.wind_strength;
        let w = &self.wind;
        if speed < w.ideal_min {
            &tiers.light
        } else if speed <= w.ideal_max {
            &tiers.moderate
        } else if speed <= w.acceptable_max {
            &tiers.fresh
        } else if speed <= w.dangerous_max {
            &tiers.strong
        } else {
            &tiers.very_strong
        }
    }

    #[must_use]
    pub fn gradient_style(&self, rating: GradientRating) -> &DisplayStyle {
        let styles = &self.display.gradient;
        match rating {
            GradientRating::Low => &styles.low,
            GradientRating::Medium => &styles.medium,
            GradientRating::High => &styles.high,
        }
    }

    #[must_use]
    pub fn gradient_icon(&self, rating: GradientRating) -> &str {
        &self.gradient_style(rating).icon
    }
}
