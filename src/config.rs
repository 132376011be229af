use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "ISOTOPE_DASHBOARD_CONFIG";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Tunables for the dashboard. Every field has a default, so a config file
/// only needs the keys it wants to change.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Initial value of the minimum-production slider, in TBq.
    pub default_min_production: f64,
    /// How many countries from the catalogue start out selected.
    pub default_country_count: usize,
    /// Added to the largest production value to get the slider maximum.
    pub slider_headroom: f64,
    /// Bars in the "top producing countries" chart.
    pub top_countries: usize,
    /// Bars in the "most common isotopes" chart.
    pub top_isotopes: usize,
    /// Map bubble radius is production divided by this.
    pub bubble_scale: f64,
    /// Data file loaded on start-up.
    pub data_path: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_min_production: 100.0,
            default_country_count: 5,
            slider_headroom: 1000.0,
            top_countries: 10,
            top_isotopes: 10,
            bubble_scale: 20.0,
            data_path: None,
        }
    }
}

impl DashboardConfig {
    /// Read a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Load from the file named by [`CONFIG_ENV`], falling back to defaults
    /// when it is unset or unreadable.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV) else {
            return Self::default();
        };
        let path = PathBuf::from(path);
        match Self::from_file(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config: {e:#}");
                Self::default()
            }
        }
    }
}
