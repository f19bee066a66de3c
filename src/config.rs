//! Application configuration.
//!
//! Settings live in `<config dir>/wine-narrative/config.toml`, or in the file
//! named by `WINE_NARRATIVE_CONFIG`. Partial files are fine: every missing
//! value falls back to its default.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable pointing at an explicit config file
pub const CONFIG_ENV: &str = "WINE_NARRATIVE_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrativeConfig {
    /// JSON array of reviews
    pub dataset_path: PathBuf,
    /// Raster image shown on the intro scene
    pub intro_image_path: PathBuf,
    /// Where exported SVG scenes are written
    pub export_dir: PathBuf,
    pub window_width: f32,
    pub window_height: f32,
    /// Number of rendered scenes kept for resizes and revisits
    pub render_cache_size: usize,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("winemag-data-130k-v2.json"),
            intro_image_path: PathBuf::from("wine.png"),
            export_dir: dirs::picture_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("wine-narrative"),
            window_width: 1200.0,
            window_height: 800.0,
            render_cache_size: 12,
        }
    }
}

impl NarrativeConfig {
    /// Default location of the config file, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("wine-narrative").join("config.toml"))
    }

    /// Load from `WINE_NARRATIVE_CONFIG` or the default location.
    ///
    /// A missing file is not an error.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(Self::default_path);
        match path {
            Some(path) if path.exists() => Self::from_file(&path),
            Some(path) => {
                log::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
