//! Paragliding Forecast Aggregation
//!
//! Groups hourly metrics by local calendar day, summarizes each day and picks
//! the best flying window across the detailed days. Everything here is pure;
//! fetching observations is the caller's job.

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::config::{ForecastDefaults, TuningConfig};
use crate::models::{DayForecast, DaySummary, HourlyMetrics, HourlyObservation, Site, SiteForecast, WindUnit};
use crate::paragliding::metrics::compute_hourly_metrics;
use crate::paragliding::scoring::xc_potential;
use crate::paragliding::wind_analysis::compass;
use crate::paragliding::ThermalRating;
use crate::Result;

/// Number of best hours averaged into a day score
const DAY_SCORE_TOP_N: usize = 3;

/// A best window below this score is not worth highlighting
const MIN_BEST_WINDOW_SCORE: u8 = 3;

/// Detailed days used when the options ask for none
const DEFAULT_DETAILED_DAYS: usize = 3;

/// Per-request forecast shaping options
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastOptions {
    pub units: WindUnit,
    /// Days reported hour by hour; the rest are summarized. Zero means the default of 3.
    pub detailed_days: usize,
    pub timezone: Tz,
    /// First local hour included in a day (inclusive)
    pub first_hour: u32,
    /// Last local hour included in a day (inclusive)
    pub last_hour: u32,
}

impl Default for ForecastOptions {
    fn default() -> Self {
        Self {
            units: WindUnit::Mph,
            detailed_days: DEFAULT_DETAILED_DAYS,
            timezone: chrono_tz::Europe::London,
            first_hour: 8,
            last_hour: 18,
        }
    }
}

impl ForecastOptions {
    /// Build options from the configured forecast defaults
    pub fn from_defaults(defaults: &ForecastDefaults) -> Result<Self> {
        Ok(Self {
            units: defaults.units,
            detailed_days: defaults.detailed_days,
            timezone: defaults.tz()?,
            first_hour: defaults.first_hour,
            last_hour: defaults.last_hour,
        })
    }

    fn includes_hour(&self, hour: u32) -> bool {
        (self.first_hour..=self.last_hour).contains(&hour)
    }
}

/// Summarize one day's hourly metrics
///
/// The day score is the rounded mean of the top three hourly scores, so a
/// single good hour does not make a good day. Wind direction is a plain
/// arithmetic mean and is wrong for days straddling north (350° and 10°
/// average to 180°).
#[must_use]
pub fn summarize_day(date: NaiveDate, metrics: &[HourlyMetrics], tc: &TuningConfig) -> DaySummary {
    if metrics.is_empty() {
        return DaySummary {
            date,
            ..Default::default()
        };
    }

    let n = metrics.len();
    let mut total_wind = 0.0;
    let mut total_dir = 0.0;
    let mut max_gusts = 0.0_f64;
    let mut max_precip = 0.0_f64;
    let mut max_cape = 0.0_f64;
    let mut total_cloudbase = 0u64;
    let mut best_thermal = ThermalRating::None;
    let mut scores = Vec::with_capacity(n);

    for m in metrics {
        total_wind += m.wind_speed;
        total_dir += m.wind_direction;
        max_gusts = max_gusts.max(m.wind_gusts);
        max_precip = max_precip.max(m.precipitation_probability);
        max_cape = max_cape.max(m.cape);
        total_cloudbase += u64::from(m.cloudbase_ft);
        best_thermal = best_thermal.max(m.thermal_rating);
        scores.push(m.flyability_score);
    }

    let avg_wind = total_wind / n as f64;
    let avg_dir = total_dir / n as f64;
    let avg_cloudbase = (total_cloudbase / n as u64) as u32;

    DaySummary {
        date,
        avg_wind_speed: avg_wind,
        avg_wind_dir: avg_dir,
        wind_dir_str: compass(avg_dir).to_string(),
        max_gusts,
        thermal_rating: best_thermal,
        max_precip_prob: max_precip,
        avg_cloudbase,
        best_score: day_score(&mut scores),
        xc_potential: xc_potential(max_cape, avg_cloudbase, avg_wind, best_thermal, tc),
    }
}

/// Rounded mean of the top scores, ties rounded up
fn day_score(scores: &mut [u8]) -> u8 {
    scores.sort_unstable_by(|a, b| b.cmp(a));
    let top = &scores[..scores.len().min(DAY_SCORE_TOP_N)];
    if top.is_empty() {
        return 0;
    }
    let sum: usize = top.iter().map(|&s| usize::from(s)).sum();
    ((sum + top.len() / 2) / top.len()) as u8
}

/// Build the full multi-day forecast for one site
///
/// Observations are grouped by local date in the order they are first seen.
/// The first `detailed_days` dates are always emitted with their hours;
/// later dates become summaries and are dropped when no hour falls inside
/// the daily window.
#[must_use]
pub fn build_site_forecast(
    site: &Site,
    observations: &[HourlyObservation],
    tc: &TuningConfig,
    options: &ForecastOptions,
    generated_at: DateTime<Utc>,
) -> SiteForecast {
    let tz = options.timezone;
    let detailed_limit = match options.detailed_days {
        0 => DEFAULT_DETAILED_DAYS,
        n => n,
    };

    let mut days: Vec<(NaiveDate, Vec<HourlyMetrics>)> = Vec::new();
    for obs in observations {
        let local = obs.time.with_timezone(&tz);
        let date = local.date_naive();
        let idx = match days.iter().position(|(d, _)| *d == date) {
            Some(idx) => idx,
            None => {
                days.push((date, Vec::new()));
                days.len() - 1
            }
        };

        if options.includes_hour(local.hour()) {
            let mut metrics = compute_hourly_metrics(obs, site, tc);
            metrics.time = local.fixed_offset();
            days[idx].1.push(metrics);
        }
    }

    let mut detailed_days = Vec::new();
    let mut extended_days = Vec::new();
    let mut best: Option<(u8, DateTime<chrono::FixedOffset>)> = None;

    for (day_idx, (date, hours)) in days.into_iter().enumerate() {
        if day_idx < detailed_limit {
            for m in &hours {
                if best.is_none_or(|(score, _)| m.flyability_score > score) {
                    best = Some((m.flyability_score, m.time));
                }
            }
            let summary = summarize_day(date, &hours, tc);
            detailed_days.push(DayForecast { date, hours, summary });
        } else if !hours.is_empty() {
            extended_days.push(summarize_day(date, &hours, tc));
        }
    }

    let best_window = best
        .filter(|(score, _)| *score >= MIN_BEST_WINDOW_SCORE)
        .map(|(_, time)| time.format("%a %H:%M").to_string());

    debug!(
        "Built forecast for {}: {} detailed days, {} extended days, best window {:?}",
        site.name,
        detailed_days.len(),
        extended_days.len(),
        best_window
    );

    SiteForecast {
        site: site.clone(),
        generated: generated_at.with_timezone(&tz).fixed_offset(),
        units: options.units,
        detailed_days,
        extended_days,
        best_window,
    }
}
