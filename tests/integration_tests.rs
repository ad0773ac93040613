//! Integration tests for the pgforecast library

use chrono::{DateTime, Duration, TimeZone, Timelike, Utc};
use pgforecast::models::{PRESSURE_LEVELS_HPA, find_site};
use pgforecast::paragliding::summarize_day;
use pgforecast::weather::parse_open_meteo_json;
use pgforecast::{
    ForecastOptions, GradientRating, HourlyObservation, ParaglidingForecastService, PressureLevel, Site,
    ThermalRating, TuningConfig, WeatherSource, WindUnit, build_site_forecast, compute_hourly_metrics,
};

/// Serves canned observations for every site except those named "Offline"
struct FakeWeather {
    observations: Vec<HourlyObservation>,
}

impl WeatherSource for FakeWeather {
    async fn fetch_hourly(&self, site: &Site, _units: WindUnit) -> anyhow::Result<Vec<HourlyObservation>> {
        if site.name == "Offline" {
            anyhow::bail!("connection refused");
        }
        Ok(self.observations.clone())
    }
}

fn ringstead() -> Site {
    Site {
        name: "Ringstead".to_string(),
        lat: 50.63,
        lon: -2.35,
        elevation: 147,
        wind_min: 210,
        wind_max: 260,
        best_dir: 225,
        aspect: 225,
    }
}

fn named(name: &str) -> Site {
    Site {
        name: name.to_string(),
        ..ringstead()
    }
}

fn perfect_hour(time: DateTime<Utc>) -> HourlyObservation {
    HourlyObservation {
        time,
        wind_speed: 14.0,
        wind_direction: 225.0,
        wind_gusts: 18.0,
        temperature: 18.0,
        dew_point: 10.0,
        cape: 200.0,
        precipitation_probability: 10.0,
        freezing_level_height: 2000.0,
        is_day: true,
        pressure_levels: PRESSURE_LEVELS_HPA
            .iter()
            .map(|&pressure| PressureLevel {
                pressure,
                wind_speed: if pressure == 700 { 40.0 } else { 16.0 },
                wind_direction: 230.0,
                temperature: 12.0 - f64::from(1000 - pressure) / 20.0,
                geopotential_height: f64::from(1000 - pressure) * 10.0,
            })
            .collect(),
        ..Default::default()
    }
}

fn week_of_hours() -> Vec<HourlyObservation> {
    let start = Utc.with_ymd_and_hms(2026, 2, 19, 0, 0, 0).unwrap();
    (0..7 * 24).map(|h| perfect_hour(start + Duration::hours(h))).collect()
}

fn utc_options() -> ForecastOptions {
    ForecastOptions {
        timezone: chrono_tz::UTC,
        ..Default::default()
    }
}

#[test]
fn test_perfect_conditions_are_deterministic() {
    let tc = TuningConfig::default();
    let obs = perfect_hour(Utc::now());

    let first = compute_hourly_metrics(&obs, &ringstead(), &tc);
    assert!((4..=5).contains(&first.flyability_score));
    assert_eq!(first.wind_gradient, GradientRating::Low);

    for _ in 0..5 {
        assert_eq!(compute_hourly_metrics(&obs, &ringstead(), &tc), first);
    }
}

#[test]
fn test_day_score_is_top_three_average() {
    let tc = TuningConfig::default();
    let obs = perfect_hour(Utc::now());
    let metrics: Vec<_> = [5u8, 4, 4, 3, 2]
        .into_iter()
        .map(|score| {
            let mut m = compute_hourly_metrics(&obs, &ringstead(), &tc);
            m.flyability_score = score;
            m
        })
        .collect();

    let summary = summarize_day(obs.time.date_naive(), &metrics, &tc);
    assert_eq!(summary.best_score, 4);
}

#[test]
fn test_open_meteo_fixture_through_forecast() {
    let raw = r#"{
        "hourly": {
            "time": ["2026-02-19T08:00", "2026-02-19T09:00"],
            "temperature_2m": [10.0, 11.0],
            "dew_point_2m": [7.0, 7.0],
            "wind_speed_10m": [12.0, 14.0],
            "wind_direction_10m": [225.0, 230.0],
            "wind_gusts_10m": [20.0, 22.0],
            "cape": [100.0, 200.0],
            "is_day": [1, 1],
            "wind_speed_950hPa": [16.0, 18.0],
            "wind_speed_850hPa": [22.0, 25.0],
            "wind_speed_700hPa": [40.0, 45.0],
            "temperature_925hPa": [5.0, 6.0],
            "geopotential_height_925hPa": [750.0, 750.0],
            "temperature_700hPa": [-10.0, -9.0],
            "geopotential_height_700hPa": [3000.0, 3000.0]
        }
    }"#;

    let observations = parse_open_meteo_json(raw.as_bytes()).unwrap();
    assert_eq!(observations.len(), 2);
    assert_eq!(observations[0].pressure_levels.len(), 6);

    let forecast = build_site_forecast(
        &ringstead(),
        &observations,
        &TuningConfig::default(),
        &utc_options(),
        Utc::now(),
    );

    assert_eq!(forecast.detailed_days.len(), 1);
    let hours = &forecast.detailed_days[0].hours;
    assert_eq!(hours.len(), 2);
    // 22 at 850 hPa over a 12 surface wind, 45 at 700 hPa ignored
    assert_eq!(hours[0].wind_gradient_diff, 10.0);
    assert_eq!(hours[0].wind_gradient, GradientRating::Medium);
    assert_eq!(hours[0].thermal_rating, ThermalRating::None);
    assert_eq!(hours[0].wind_dir_str, "SW");
}

#[test]
fn test_site_forecast_wire_format() {
    let forecast = build_site_forecast(
        &ringstead(),
        &week_of_hours(),
        &TuningConfig::default(),
        &utc_options(),
        Utc.with_ymd_and_hms(2026, 2, 19, 6, 0, 0).unwrap(),
    );

    let value = serde_json::to_value(&forecast).unwrap();
    assert_eq!(value["units"], "mph");
    assert_eq!(value["site"]["name"], "Ringstead");
    assert_eq!(value["detailed_days"].as_array().unwrap().len(), 3);
    assert_eq!(value["extended_days"].as_array().unwrap().len(), 4);
    assert_eq!(value["best_window"], "Thu 08:00");

    assert_eq!(value["detailed_days"][0]["date"], "2026-02-19");
    assert_eq!(value["detailed_days"][0]["summary"]["date"], "2026-02-19");
    assert_eq!(value["generated"], "2026-02-19T06:00:00+00:00");

    let hour = &value["detailed_days"][0]["hours"][0];
    assert_eq!(hour["time"], "2026-02-19T08:00:00+00:00");
    assert!(hour["flyability_score"].is_u64());
    assert!(hour["is_day"].is_boolean());
    assert!(hour["precip_probability"].is_number());
    assert_eq!(hour["pressure_levels"][0]["pressure_hpa"], 1000);

    let summary = &value["extended_days"][0];
    assert!(summary["avg_cloudbase_ft"].is_u64());
    assert_eq!(summary["wind_dir_str"], "SW");
    assert_eq!(summary["date"], "2026-02-22");
}

#[test]
fn test_local_timezone_grouping() {
    let options = ForecastOptions {
        timezone: chrono_tz::America::New_York,
        detailed_days: 2,
        ..Default::default()
    };
    let forecast = build_site_forecast(
        &ringstead(),
        &week_of_hours(),
        &TuningConfig::default(),
        &options,
        Utc::now(),
    );

    // New York is UTC-5 in February, so the first local date is the 18th
    assert_eq!(
        forecast.detailed_days[0].date,
        chrono::NaiveDate::from_ymd_opt(2026, 2, 18).unwrap()
    );
    for day in &forecast.detailed_days {
        for hour in &day.hours {
            assert!((8..=18).contains(&hour.time.hour()));
            assert_eq!(hour.time.offset().local_minus_utc(), -5 * 3600);
        }
    }
}

#[tokio::test]
async fn test_service_skips_failing_sites() {
    let service = ParaglidingForecastService::new(
        FakeWeather {
            observations: week_of_hours(),
        },
        TuningConfig::default(),
    );
    let sites = vec![ringstead(), named("Offline"), named("Bell Hill")];

    let forecasts = service.generate_all(&sites, &utc_options()).await;

    assert_eq!(forecasts.len(), 2);
    assert_eq!(forecasts[0].site.name, "Ringstead");
    assert_eq!(forecasts[1].site.name, "Bell Hill");
    assert!(forecasts.iter().all(|f| f.best_window.is_some()));
}

#[tokio::test]
async fn test_service_single_site() {
    let service = ParaglidingForecastService::new(
        FakeWeather {
            observations: week_of_hours(),
        },
        TuningConfig::default(),
    );
    let sites = vec![ringstead(), named("Bell Hill")];
    let site = find_site(&sites, "bell").unwrap();

    let forecast = service.generate(site, &utc_options()).await.unwrap();
    assert_eq!(forecast.site.name, "Bell Hill");
    assert_eq!(forecast.detailed_days.len(), 3);

    assert!(service.generate(&named("Offline"), &utc_options()).await.is_err());
}
