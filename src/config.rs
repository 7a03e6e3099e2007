//! Dashboard configuration, read from `dashboard.json` when present.

use crate::stats::DEFAULT_RANKING_SIZE;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "dashboard.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// CSV export loaded once at startup.
    pub data_path: PathBuf,
    pub title: String,
    pub window_size: [f32; 2],
    /// Number of categories in each of the top and bottom rankings.
    pub ranking_size: usize,
    /// Row height of the raw and filtered table previews, in points.
    pub row_height: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("dashboard/main_data.csv"),
            title: "E-Commerce Sales Dashboard".to_string(),
            window_size: [1400.0, 900.0],
            ranking_size: DEFAULT_RANKING_SIZE,
            row_height: 18.0,
        }
    }
}

impl DashboardConfig {
    /// Read `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No {} found, using default configuration", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;

        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}
