//! Firmware configuration
//!
//! Reads `face.toml` from the path in `NIMBUS_CONFIG`, or the copy embedded
//! in the binary when the variable is unset.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use nimbus_core::config::FaceConfig;

/// Environment variable naming an alternative config file
pub const CONFIG_ENV: &str = "NIMBUS_CONFIG";

/// Embedded default configuration
/// Edit face.toml and rebuild to change it
const EMBEDDED_CONFIG: &str = include_str!("../face.toml");

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("surface must be at least 1x1, got {width}x{height}")]
    EmptySurface { width: u32, height: u32 },
}

/// The screen being emulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: u32,
    pub height: u32,
    pub round: bool,
    /// Whether the emulated screen has only 1-bit ambient colour
    pub low_bit_ambient: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 320,
            round: false,
            low_bit_ambient: false,
        }
    }
}

/// Everything the host build needs
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FirmwareConfig {
    #[serde(default)]
    pub face: FaceConfig,
    #[serde(default)]
    pub surface: SurfaceConfig,
    pub storage_dir: PathBuf,
    pub asset_dir: PathBuf,
    pub feed_path: PathBuf,
    pub frame_path: PathBuf,
}

impl FirmwareConfig {
    /// Load from `NIMBUS_CONFIG` or the embedded default
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => {
                log::info!("Using embedded configuration");
                Self::parse(EMBEDDED_CONFIG)
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading configuration from {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let config: FirmwareConfig = toml::from_str(text)?;
        let SurfaceConfig { width, height, .. } = config.surface;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptySurface { width, height });
        }
        Ok(config)
    }
}
