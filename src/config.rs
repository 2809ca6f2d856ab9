//! Runtime configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working configuration for Robeson County.

use crate::error::ConfigError;
use crate::types::Coordinate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "ROBESON_DIRECTORY_CONFIG";

/// Environment variable overriding `[data].path`.
pub const DATA_ENV: &str = "ROBESON_DIRECTORY_DATA";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub resolver: ResolverConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Organization feed (JSON records or spreadsheet values export).
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("robeson_county.json"),
        }
    }
}

/// Tuning for the address resolver. Values are in degrees.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Fallback position for addresses that match nothing.
    pub county_center: Coordinate,
    /// Reference point of the plausibility check.
    pub service_area_center: Coordinate,
    /// Maximum euclidean distance from `service_area_center`.
    pub service_area_radius: f64,
    /// Collision ring radius for ordinary services.
    pub offset_radius: f64,
    /// Collision ring radius for crisis/priority services.
    pub priority_offset_radius: f64,
    /// Full width of the street-number jitter box.
    pub street_number_spread: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            county_center: Coordinate::new(34.6293, -79.1148),
            service_area_center: Coordinate::new(34.6400, -79.1100),
            service_area_radius: 0.7,
            offset_radius: 0.0008,
            priority_offset_radius: 0.0012,
            street_number_spread: 0.004,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Cap on "similar" organizations appended to direct matches.
    pub similar_limit: usize,
    /// Result count returned by tools when the caller gives no limit.
    pub default_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            similar_limit: 10,
            default_limit: 25,
        }
    }
}

impl Config {
    /// Parse a configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration using the environment lookup order:
    /// `ROBESON_DIRECTORY_CONFIG`, then the user config directory, then defaults.
    /// `ROBESON_DIRECTORY_DATA` overrides the feed path in every case.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let mut config = match explicit.or_else(default_config_path) {
            Some(path) if path.is_file() => {
                tracing::info!("Loading config from {}", path.display());
                Self::from_file(&path)?
            }
            Some(path) => {
                tracing::debug!("No config at {}, using defaults", path.display());
                Self::default()
            }
            None => Self::default(),
        };

        if let Some(data) = std::env::var_os(DATA_ENV) {
            config.data.path = PathBuf::from(data);
        }

        Ok(config)
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("robeson-directory").join("config.toml"))
}
