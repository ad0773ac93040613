//! Paragliding Forecast Service
//!
//! Glues a [`WeatherSource`] to the pure forecast builder. Sites are fetched
//! concurrently; a site whose fetch fails is logged and skipped so the rest
//! of the batch still produces forecasts.

use anyhow::Result;
use chrono::Utc;
use futures::future::join_all;
use tracing::{info, instrument, warn};

use crate::config::TuningConfig;
use crate::models::{Site, SiteForecast};
use crate::paragliding::{ForecastOptions, build_site_forecast};
use crate::weather::WeatherSource;

/// Paragliding forecast service
pub struct ParaglidingForecastService<S> {
    source: S,
    tuning: TuningConfig,
}

impl<S: WeatherSource> ParaglidingForecastService<S> {
    /// Create a service over a weather source and a tuning snapshot
    pub fn new(source: S, tuning: TuningConfig) -> Self {
        Self { source, tuning }
    }

    #[must_use]
    pub fn tuning(&self) -> &TuningConfig {
        &self.tuning
    }

    /// Fetch observations for one site and build its forecast
    #[instrument(skip(self, site, options), fields(site = %site.name))]
    pub async fn generate(&self, site: &Site, options: &ForecastOptions) -> Result<SiteForecast> {
        let observations = self.source.fetch_hourly(site, options.units).await?;
        info!(
            "Building forecast for {} from {} hourly observations",
            site.name,
            observations.len()
        );
        Ok(build_site_forecast(
            site,
            &observations,
            &self.tuning,
            options,
            Utc::now(),
        ))
    }

    /// Generate forecasts for every site, skipping sites that fail
    ///
    /// Results keep the order of `sites`.
    pub async fn generate_all(&self, sites: &[Site], options: &ForecastOptions) -> Vec<SiteForecast> {
        info!("Generating forecasts for {} sites", sites.len());

        let results = join_all(sites.iter().map(|site| self.generate(site, options))).await;

        let forecasts: Vec<SiteForecast> = sites
            .iter()
            .zip(results)
            .filter_map(|(site, result)| match result {
                Ok(forecast) => Some(forecast),
                Err(e) => {
                    warn!("Skipping {}: {:#}", site.name, e);
                    None
                }
            })
            .collect();

        if forecasts.len() < sites.len() {
            warn!(
                "Generated {} of {} site forecasts",
                forecasts.len(),
                sites.len()
            );
        }
        forecasts
    }
}
