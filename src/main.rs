//! `pgforecast` command line: fetch, score and print site forecasts as JSON

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pgforecast::config::LoggingConfig;
use pgforecast::models::{find_site, load_sites};
use pgforecast::{AppConfig, ForecastOptions, OpenMeteoClient, ParaglidingForecastService, Site, WindUnit};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Paragliding forecast tool
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Wind units: mph, kph, knots or ms
    #[arg(short, long)]
    units: Option<WindUnit>,

    /// IANA timezone used to group hours into days
    #[arg(long)]
    timezone: Option<String>,

    /// Number of detailed forecast days
    #[arg(long)]
    days: Option<usize>,

    /// Weather model (auto, gfs_seamless, icon_seamless, ...)
    #[arg(long)]
    model: Option<String>,

    /// Path to a JSON sites file
    #[arg(short, long, required_unless_present = "lat", conflicts_with = "lat")]
    sites: Option<PathBuf>,

    /// Only forecast the named site from the sites file
    #[arg(long, requires = "sites")]
    site: Option<String>,

    /// Latitude for an ad-hoc site
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Longitude for an ad-hoc site
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Name for the ad-hoc site
    #[arg(long, default_value = "Custom")]
    name: String,

    /// Direction the ad-hoc site's slope faces, in degrees
    #[arg(long, default_value_t = 0)]
    aspect: u16,

    /// Acceptable wind directions for the ad-hoc site, e.g. 210-260
    #[arg(long)]
    wind_range: Option<String>,
}

impl Args {
    /// Command-line flags take precedence over file and environment config
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(units) = self.units {
            config.forecast.units = units;
        }
        if let Some(timezone) = &self.timezone {
            config.forecast.timezone.clone_from(timezone);
        }
        if let Some(days) = self.days {
            config.forecast.detailed_days = days;
        }
        if let Some(model) = &self.model {
            config.weather.model.clone_from(model);
        }
    }

    fn resolve_sites(&self) -> Result<Vec<Site>> {
        if let (Some(lat), Some(lon)) = (self.lat, self.lon) {
            let (wind_min, wind_max) = match &self.wind_range {
                Some(range) => Site::parse_wind_range(range)?,
                None => (0, 0),
            };
            let site = Site {
                name: self.name.clone(),
                lat,
                lon,
                elevation: 0,
                wind_min,
                wind_max,
                best_dir: self.aspect,
                aspect: self.aspect,
            };
            site.validate()?;
            return Ok(vec![site]);
        }

        let path = self
            .sites
            .as_ref()
            .context("Specify --sites or --lat/--lon")?;
        let sites = load_sites(path).with_context(|| format!("Failed to load sites from {}", path.display()))?;

        match &self.site {
            Some(name) => Ok(vec![find_site(&sites, name)?.clone()]),
            None => Ok(sites),
        }
    }
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load_from_path(args.config.clone())?;
    args.apply_overrides(&mut config);
    config.validate().context("Invalid command-line overrides")?;

    init_logging(&config.logging);
    debug!("Loaded configuration: {:?}", config);

    let sites = args.resolve_sites()?;
    let options = ForecastOptions::from_defaults(&config.forecast)?;
    let client = OpenMeteoClient::new(&config.weather)?;
    let service = ParaglidingForecastService::new(client, config.tuning);

    info!("Forecasting {} site(s) in {}", sites.len(), options.units);
    let forecasts = service.generate_all(&sites, &options).await;

    for forecast in &forecasts {
        println!("{}", serde_json::to_string_pretty(forecast)?);
    }

    Ok(())
}
