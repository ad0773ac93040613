//! Configuration management for pgforecast
//!
//! Handles loading configuration from files and environment variables,
//! merging everything over built-in defaults, and validating the tuning
//! thresholds the scoring engine depends on.

use crate::display::DisplayConfig;
use crate::models::WindUnit;
use crate::{PgForecastError, Result};
use anyhow::Context;
use chrono_tz::Tz;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Weather API configuration
    pub weather: WeatherConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Forecast defaults used when the command line does not override them
    pub forecast: ForecastDefaults,
    /// Scoring thresholds, bonuses and penalties
    pub tuning: TuningConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL for the Open-Meteo API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for transient failures
    #[serde(default = "default_weather_max_retries")]
    pub max_retries: u32,
    /// Weather model (auto, gfs, ecmwf, icon, ...)
    #[serde(default = "default_weather_model")]
    pub model: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Default forecast options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDefaults {
    #[serde(default)]
    pub units: WindUnit,
    /// Number of days reported hour by hour
    #[serde(default = "default_detailed_days")]
    pub detailed_days: usize,
    /// IANA timezone used to split hours into days
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// First local hour considered flyable
    #[serde(default = "default_first_hour")]
    pub first_hour: u32,
    /// Last local hour considered flyable (inclusive)
    #[serde(default = "default_last_hour")]
    pub last_hour: u32,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_weather_timeout() -> u32 {
    30
}

fn default_weather_max_retries() -> u32 {
    3
}

fn default_weather_model() -> String {
    "auto".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_detailed_days() -> usize {
    3
}

fn default_timezone() -> String {
    "Europe/London".to_string()
}

fn default_first_hour() -> u32 {
    8
}

fn default_last_hour() -> u32 {
    18
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            timeout_seconds: default_weather_timeout(),
            max_retries: default_weather_max_retries(),
            model: default_weather_model(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ForecastDefaults {
    fn default() -> Self {
        Self {
            units: WindUnit::default(),
            detailed_days: default_detailed_days(),
            timezone: default_timezone(),
            first_hour: default_first_hour(),
            last_hour: default_last_hour(),
        }
    }
}

impl ForecastDefaults {
    /// Parse the configured timezone
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| PgForecastError::config(format!("Unknown timezone '{}'", self.timezone)))
    }
}

/// Every tunable parameter of the scoring engine.
///
/// A snapshot is read-only while forecasts are computed; replacing tuning
/// means building a new value. Wind speeds share the forecast's [`WindUnit`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningConfig {
    pub wind: WindTuning,
    pub gradient: GradientTuning,
    pub thermal: ThermalTuning,
    pub orographic: OrographicTuning,
    pub cloudbase: CloudbaseTuning,
    pub scoring: ScoringTuning,
    pub xc: XcTuning,
    pub display: DisplayConfig,
}

/// Surface wind speed bands and gust factors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindTuning {
    pub ideal_min: f64,
    pub ideal_max: f64,
    pub acceptable_min: f64,
    pub acceptable_max: f64,
    pub dangerous_max: f64,
    pub max_gust_factor: f64,
    pub dangerous_gust_factor: f64,
}

/// Wind gradient thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientTuning {
    pub low_threshold: f64,
    pub high_threshold: f64,
    /// Kept for config compatibility; scoring reads `scoring.gradient_high_penalty`
    pub high_penalty: f64,
    /// Kept for config compatibility; scoring reads `scoring.gradient_med_penalty`
    pub medium_penalty: f64,
}

/// CAPE brackets (J/kg) and lapse-rate bonus threshold (°C/km)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThermalTuning {
    pub cape_weak: f64,
    pub cape_moderate: f64,
    pub cape_strong: f64,
    pub cape_extreme: f64,
    pub lapse_rate_bonus: f64,
}

/// Orographic lift angle brackets in degrees off the slope aspect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrographicTuning {
    pub min_wind_speed: f64,
    pub strong_angle: f64,
    pub moderate_angle: f64,
    pub weak_angle: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudbaseTuning {
    pub min_realistic_ft: u32,
}

/// Flyability score base value, bonuses and penalties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringTuning {
    pub base_score: f64,
    pub wind_ideal_bonus: f64,
    pub wind_acceptable_bonus: f64,
    pub wind_danger_penalty: f64,
    pub wind_high_penalty: f64,
    pub dir_on_bonus: f64,
    pub dir_off_penalty: f64,
    pub gust_high_penalty: f64,
    pub gust_med_penalty: f64,
    pub rain_penalty: f64,
    pub rain_prob_penalty: f64,
    pub gradient_high_penalty: f64,
    pub gradient_med_penalty: f64,
    pub cape_bonus: f64,
    pub thermal_strong_bonus: f64,
}

/// Cross-country potential thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XcTuning {
    pub min_cloudbase_ft: u32,
    pub good_cloudbase_ft: u32,
    pub max_wind_speed: f64,
    pub min_wind_speed: f64,
    pub epic_threshold: u32,
    pub high_threshold: u32,
    pub medium_threshold: u32,
}

impl Default for WindTuning {
    fn default() -> Self {
        Self {
            ideal_min: 8.0,
            ideal_max: 18.0,
            acceptable_min: 5.0,
            acceptable_max: 22.0,
            dangerous_max: 25.0,
            max_gust_factor: 1.5,
            dangerous_gust_factor: 2.0,
        }
    }
}

impl Default for GradientTuning {
    fn default() -> Self {
        Self {
            low_threshold: 10.0,
            high_threshold: 20.0,
            high_penalty: -2.0,
            medium_penalty: -1.0,
        }
    }
}

impl Default for ThermalTuning {
    fn default() -> Self {
        Self {
            cape_weak: 100.0,
            cape_moderate: 300.0,
            cape_strong: 1000.0,
            cape_extreme: 2500.0,
            lapse_rate_bonus: 8.0,
        }
    }
}

impl Default for OrographicTuning {
    fn default() -> Self {
        Self {
            min_wind_speed: 8.0,
            strong_angle: 15.0,
            moderate_angle: 30.0,
            weak_angle: 45.0,
        }
    }
}

impl Default for CloudbaseTuning {
    fn default() -> Self {
        Self {
            min_realistic_ft: 200,
        }
    }
}

impl Default for ScoringTuning {
    fn default() -> Self {
        Self {
            base_score: 2.5,
            wind_ideal_bonus: 1.0,
            wind_acceptable_bonus: 0.5,
            wind_danger_penalty: -2.0,
            wind_high_penalty: -1.0,
            dir_on_bonus: 1.5,
            dir_off_penalty: -2.0,
            gust_high_penalty: -1.5,
            gust_med_penalty: -0.5,
            rain_penalty: -2.5,
            rain_prob_penalty: -0.5,
            gradient_high_penalty: -1.5,
            gradient_med_penalty: -0.5,
            cape_bonus: 0.5,
            thermal_strong_bonus: 0.5,
        }
    }
}

impl Default for XcTuning {
    fn default() -> Self {
        Self {
            min_cloudbase_ft: 3000,
            good_cloudbase_ft: 4000,
            max_wind_speed: 20.0,
            min_wind_speed: 8.0,
            epic_threshold: 7,
            high_threshold: 5,
            medium_threshold: 3,
        }
    }
}

fn check_finite(group: &str, values: &[(&str, f64)]) -> Result<()> {
    match values.iter().find(|(_, v)| !v.is_finite()) {
        Some((name, value)) => Err(PgForecastError::config(format!(
            "{group}.{name} must be a finite number, got {value}"
        ))),
        None => Ok(()),
    }
}

/// Fail unless each value is finite and strictly below the next
fn check_increasing(group: &str, values: &[(&str, f64)]) -> Result<()> {
    check_finite(group, values)?;
    for pair in values.windows(2) {
        let ((low_name, low), (high_name, high)) = (pair[0], pair[1]);
        if low >= high {
            return Err(PgForecastError::config(format!(
                "{group}.{low_name} ({low}) must be below {group}.{high_name} ({high})"
            )));
        }
    }
    Ok(())
}

fn check_not_above(group: &str, low: (&str, f64), high: (&str, f64)) -> Result<()> {
    check_finite(group, &[low, high])?;
    if low.1 > high.1 {
        return Err(PgForecastError::config(format!(
            "{group}.{} ({}) must not exceed {group}.{} ({})",
            low.0, low.1, high.0, high.1
        )));
    }
    Ok(())
}

impl TuningConfig {
    /// Reject snapshots whose thresholds are out of order.
    ///
    /// The estimators bucket values by walking these thresholds in sequence,
    /// so a snapshot with crossed thresholds would produce inconsistent ratings.
    pub fn validate(&self) -> Result<()> {
        let w = &self.wind;
        check_finite(
            "wind",
            &[
                ("ideal_min", w.ideal_min),
                ("ideal_max", w.ideal_max),
                ("acceptable_min", w.acceptable_min),
                ("acceptable_max", w.acceptable_max),
                ("dangerous_max", w.dangerous_max),
                ("max_gust_factor", w.max_gust_factor),
                ("dangerous_gust_factor", w.dangerous_gust_factor),
            ],
        )?;
        check_not_above("wind", ("acceptable_min", w.acceptable_min), ("ideal_min", w.ideal_min))?;
        check_increasing(
            "wind",
            &[
                ("ideal_min", w.ideal_min),
                ("ideal_max", w.ideal_max),
                ("acceptable_max", w.acceptable_max),
                ("dangerous_max", w.dangerous_max),
            ],
        )?;
        check_increasing(
            "wind",
            &[
                ("max_gust_factor", w.max_gust_factor),
                ("dangerous_gust_factor", w.dangerous_gust_factor),
            ],
        )?;

        let g = &self.gradient;
        check_finite(
            "gradient",
            &[
                ("low_threshold", g.low_threshold),
                ("high_threshold", g.high_threshold),
                ("high_penalty", g.high_penalty),
                ("medium_penalty", g.medium_penalty),
            ],
        )?;
        check_increasing(
            "gradient",
            &[
                ("low_threshold", g.low_threshold),
                ("high_threshold", g.high_threshold),
            ],
        )?;

        let t = &self.thermal;
        check_finite("thermal", &[("lapse_rate_bonus", t.lapse_rate_bonus)])?;
        check_increasing(
            "thermal",
            &[
                ("cape_weak", t.cape_weak),
                ("cape_moderate", t.cape_moderate),
                ("cape_strong", t.cape_strong),
                ("cape_extreme", t.cape_extreme),
            ],
        )?;

        let o = &self.orographic;
        check_finite("orographic", &[("min_wind_speed", o.min_wind_speed)])?;
        check_increasing(
            "orographic",
            &[
                ("strong_angle", o.strong_angle),
                ("moderate_angle", o.moderate_angle),
                ("weak_angle", o.weak_angle),
            ],
        )?;

        let s = &self.scoring;
        check_finite(
            "scoring",
            &[
                ("base_score", s.base_score),
                ("wind_ideal_bonus", s.wind_ideal_bonus),
                ("wind_acceptable_bonus", s.wind_acceptable_bonus),
                ("wind_danger_penalty", s.wind_danger_penalty),
                ("wind_high_penalty", s.wind_high_penalty),
                ("dir_on_bonus", s.dir_on_bonus),
                ("dir_off_penalty", s.dir_off_penalty),
                ("gust_high_penalty", s.gust_high_penalty),
                ("gust_med_penalty", s.gust_med_penalty),
                ("rain_penalty", s.rain_penalty),
                ("rain_prob_penalty", s.rain_prob_penalty),
                ("gradient_high_penalty", s.gradient_high_penalty),
                ("gradient_med_penalty", s.gradient_med_penalty),
                ("cape_bonus", s.cape_bonus),
                ("thermal_strong_bonus", s.thermal_strong_bonus),
            ],
        )?;

        let x = &self.xc;
        check_finite(
            "xc",
            &[
                ("min_wind_speed", x.min_wind_speed),
                ("max_wind_speed", x.max_wind_speed),
            ],
        )?;
        check_not_above(
            "xc",
            ("min_cloudbase_ft", f64::from(x.min_cloudbase_ft)),
            ("good_cloudbase_ft", f64::from(x.good_cloudbase_ft)),
        )?;
        check_not_above(
            "xc",
            ("min_wind_speed", x.min_wind_speed),
            ("max_wind_speed", x.max_wind_speed),
        )?;
        check_increasing(
            "xc",
            &[
                ("medium_threshold", f64::from(x.medium_threshold)),
                ("high_threshold", f64::from(x.high_threshold)),
                ("epic_threshold", f64::from(x.epic_threshold)),
            ],
        )?;

        Ok(())
    }
}

impl AppConfig {
    /// Load configuration from the default locations and environment variables
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from the given TOML file (required when provided)
    pub fn load_from_path(config_path: Option<PathBuf>) -> anyhow::Result<Self> {
        Self::load_with_env(config_path, None)
    }

    /// Layer defaults, config file and `PGF_` environment variables.
    ///
    /// `env` replaces the process environment when given.
    fn load_with_env(
        config_path: Option<PathBuf>,
        env: Option<config::Map<String, String>>,
    ) -> anyhow::Result<Self> {
        let mut builder = Config::builder();

        match config_path {
            Some(path) => {
                builder = builder.add_source(File::from(path).required(true).format(FileFormat::Toml));
            }
            None => {
                for candidate in Self::default_config_paths() {
                    if candidate.exists() {
                        builder = builder.add_source(
                            File::from(candidate)
                                .required(false)
                                .format(FileFormat::Toml),
                        );
                    }
                }
            }
        }

        // e.g. PGF_TUNING__WIND__IDEAL_MAX=20
        builder = builder.add_source(
            Environment::with_prefix("PGF")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: AppConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// User config file first, then `./pgforecast.toml`; later files win
    #[must_use]
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("pgforecast").join("config.toml"));
        }
        paths.push(PathBuf::from("pgforecast.toml"));
        paths
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_weather()?;
        self.validate_logging()?;
        self.validate_forecast()?;
        self.tuning.validate()?;
        Ok(())
    }

    fn validate_weather(&self) -> Result<()> {
        if !self.weather.base_url.starts_with("http://") && !self.weather.base_url.starts_with("https://") {
            return Err(PgForecastError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            ));
        }

        if self.weather.timeout_seconds == 0 || self.weather.timeout_seconds > 300 {
            return Err(PgForecastError::config(
                "Weather API timeout must be between 1 and 300 seconds",
            ));
        }

        if self.weather.max_retries > 10 {
            return Err(PgForecastError::config(
                "Weather API max retries cannot exceed 10",
            ));
        }

        Ok(())
    }

    fn validate_logging(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(PgForecastError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            )));
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(PgForecastError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            )));
        }

        Ok(())
    }

    fn validate_forecast(&self) -> Result<()> {
        let f = &self.forecast;
        if !(1..=16).contains(&f.detailed_days) {
            return Err(PgForecastError::config(
                "Detailed days must be between 1 and 16",
            ));
        }
        if f.first_hour > f.last_hour || f.last_hour > 23 {
            return Err(PgForecastError::config(format!(
                "Flying hours {}..={} are not a valid range of the day",
                f.first_hour, f.last_hour
            )));
        }
        f.tz()?;
        Ok(())
    }
}
