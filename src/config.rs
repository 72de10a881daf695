//! Dashboard configuration: built-in defaults, an optional YAML file named by
//! `GEODASH_CONFIG`, then `GEODASH_*` environment overrides.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

pub const MIN_YEAR: i32 = 1800;
pub const MAX_YEAR: i32 = 2100;

/// Minimum GDP used on the motion chart's log scale.
pub const GDP_FLOOR: f64 = 100.0;
/// Milliseconds per year while playback is running.
pub const ANIMATION_INTERVAL_MS: u64 = 200;
/// Zoom level at which the plant map switches from country bubbles to plants.
pub const ZOOM_THRESHOLD: f64 = 3.0;
pub const PLANT_RENDER_CAP: usize = 12_000;
pub const VIEWPORT_BUFFER_DEG: f64 = 0.5;

/// Inclusive range of years accepted as wide-table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YearBounds {
    pub min: i32,
    pub max: i32,
}

impl Default for YearBounds {
    fn default() -> Self {
        Self {
            min: MIN_YEAR,
            max: MAX_YEAR,
        }
    }
}

impl YearBounds {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }

    pub fn clamp(&self, year: i32) -> i32 {
        year.clamp(self.min, self.max)
    }

    pub fn span(&self) -> i32 {
        self.max - self.min
    }

    /// Parses a column header as a year: exactly four ASCII digits (after
    /// trimming) that fall inside the bounds.
    pub fn parse_column(&self, header: &str) -> Option<i32> {
        let trimmed = header.trim();
        if trimmed.len() != 4 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let year = trimmed.parse::<i32>().ok()?;
        self.contains(year).then_some(year)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_dir: PathBuf,
    pub static_dir: PathBuf,
    pub bind_addr: String,
    pub years: YearBounds,
    pub gdp_floor: f64,
    pub animation_interval_ms: u64,
    pub zoom_threshold: f64,
    pub plant_render_cap: usize,
    pub viewport_buffer_deg: f64,
    pub trends_enabled: bool,
    pub plants_enabled: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            years: YearBounds::default(),
            gdp_floor: GDP_FLOOR,
            animation_interval_ms: ANIMATION_INTERVAL_MS,
            zoom_threshold: ZOOM_THRESHOLD,
            plant_render_cap: PLANT_RENDER_CAP,
            viewport_buffer_deg: VIEWPORT_BUFFER_DEG,
            trends_enabled: true,
            plants_enabled: true,
        }
    }
}

impl DashboardConfig {
    /// Defaults, then the YAML file at `GEODASH_CONFIG` if set, then env overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var("GEODASH_CONFIG") {
            Ok(path) if !path.trim().is_empty() => Self::from_yaml_file(Path::new(path.trim()))?,
            _ => Self::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|err| ConfigError::Read(path.to_path_buf(), err))?;
        let config: Self =
            serde_yaml::from_str(&raw).map_err(|err| ConfigError::Parse(path.to_path_buf(), err))?;
        tracing::info!(path = %path.display(), "loaded dashboard config");
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = env::var("GEODASH_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = env::var("GEODASH_STATIC_DIR") {
            self.static_dir = PathBuf::from(dir);
        }
        if let Ok(addr) = env::var("GEODASH_BIND") {
            self.bind_addr = addr;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.years.min > self.years.max {
            return Err(ConfigError::Invalid(format!(
                "year bounds are inverted: {} > {}",
                self.years.min, self.years.max
            )));
        }
        if !self.gdp_floor.is_finite() || self.gdp_floor <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "gdp_floor must be a positive number, got {}",
                self.gdp_floor
            )));
        }
        if self.animation_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "animation_interval_ms must be greater than zero".to_string(),
            ));
        }
        if !self.trends_enabled && !self.plants_enabled {
            return Err(ConfigError::Invalid(
                "at least one dashboard must be enabled".to_string(),
            ));
        }
        Ok(())
    }
}
