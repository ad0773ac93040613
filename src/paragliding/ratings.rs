//! Closed rating enumerations produced by the estimators
//!
//! Every rating serializes as its capitalised variant name (`"Low"`,
//! `"Moderate"`, `"Epic"`, ...), which is what the browser client expects.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Wind shear between the surface and flyable altitudes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GradientRating {
    #[default]
    Low,
    Medium,
    High,
}

/// Thermal strength, ordered from weakest to strongest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ThermalRating {
    #[default]
    None,
    Weak,
    Moderate,
    Strong,
    Extreme,
}

/// Display-only bracket on raw CAPE
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapeRating {
    #[default]
    Weak,
    Moderate,
    Strong,
    Overdevelopment,
}

/// Ridge lift from wind striking the slope face
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrographicLift {
    #[default]
    None,
    Weak,
    Moderate,
    Strong,
}

/// Cross-country flying potential
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum XcPotential {
    #[default]
    Low,
    Medium,
    High,
    Epic,
}

impl fmt::Display for GradientRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradientRating::Low => write!(f, "Low"),
            GradientRating::Medium => write!(f, "Medium"),
            GradientRating::High => write!(f, "High"),
        }
    }
}

impl fmt::Display for ThermalRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThermalRating::None => write!(f, "None"),
            ThermalRating::Weak => write!(f, "Weak"),
            ThermalRating::Moderate => write!(f, "Moderate"),
            ThermalRating::Strong => write!(f, "Strong"),
            ThermalRating::Extreme => write!(f, "Extreme"),
        }
    }
}

impl fmt::Display for CapeRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapeRating::Weak => write!(f, "Weak"),
            CapeRating::Moderate => write!(f, "Moderate"),
            CapeRating::Strong => write!(f, "Strong"),
            CapeRating::Overdevelopment => write!(f, "Overdevelopment"),
        }
    }
}

impl fmt::Display for OrographicLift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrographicLift::None => write!(f, "None"),
            OrographicLift::Weak => write!(f, "Weak"),
            OrographicLift::Moderate => write!(f, "Moderate"),
            OrographicLift::Strong => write!(f, "Strong"),
        }
    }
}

impl fmt::Display for XcPotential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XcPotential::Low => write!(f, "Low"),
            XcPotential::Medium => write!(f, "Medium"),
            XcPotential::High => write!(f, "High"),
            XcPotential::Epic => write!(f, "Epic"),
        }
    }
}
