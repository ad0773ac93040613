//! Launch site model and site-list helpers

use crate::{PgForecastError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// A paragliding launch site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Launch elevation in meters
    pub elevation: i32,
    /// Start of the acceptable wind-direction range in degrees
    pub wind_min: u16,
    /// End of the acceptable wind-direction range; smaller than `wind_min` when the range wraps through north
    pub wind_max: u16,
    pub best_dir: u16,
    /// Direction the slope faces, in degrees
    pub aspect: u16,
}

/// Top-level structure of a sites file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitesFile {
    pub sites: Vec<Site>,
}

impl Site {
    /// Check coordinates and compass values are in range
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) || !(-180.0..=180.0).contains(&self.lon) {
            return Err(PgForecastError::validation(format!(
                "site '{}' has invalid coordinates {:.4}, {:.4}",
                self.name, self.lat, self.lon
            )));
        }
        for (field, value) in [
            ("wind_min", self.wind_min),
            ("wind_max", self.wind_max),
            ("best_dir", self.best_dir),
            ("aspect", self.aspect),
        ] {
            if value >= 360 {
                return Err(PgForecastError::validation(format!(
                    "site '{}' has {field} = {value}, must be below 360",
                    self.name
                )));
            }
        }
        Ok(())
    }

    /// Parse a wind range like `"210-260"` into `(wind_min, wind_max)`
    pub fn parse_wind_range(range: &str) -> Result<(u16, u16)> {
        let (min, max) = range
            .split_once('-')
            .ok_or_else(|| PgForecastError::validation(format!("wind range '{range}' must look like 210-260")))?;
        let parse = |s: &str| {
            s.trim()
                .parse::<u16>()
                .map_err(|_| PgForecastError::validation(format!("'{s}' is not a compass degree")))
        };
        Ok((parse(min)?, parse(max)?))
    }
}

/// Load and validate sites from a JSON sites file
pub fn load_sites(path: impl AsRef<Path>) -> Result<Vec<Site>> {
    let path = path.as_ref();
    info!("Loading sites from: {:?}", path);
    let content = std::fs::read_to_string(path)?;
    let file: SitesFile = serde_json::from_str(&content)?;
    for site in &file.sites {
        site.validate()?;
    }
    info!("Loaded {} sites", file.sites.len());
    Ok(file.sites)
}

/// Find a site by name: case-insensitive exact match first, then case-insensitive prefix
pub fn find_site<'a>(sites: &'a [Site], name: &str) -> Result<&'a Site> {
    let wanted = name.to_lowercase();
    sites
        .iter()
        .find(|s| s.name.to_lowercase() == wanted)
        .or_else(|| sites.iter().find(|s| s.name.to_lowercase().starts_with(&wanted)))
        .ok_or_else(|| PgForecastError::SiteNotFound {
            name: name.to_string(),
        })
}
