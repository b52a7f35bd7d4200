//! Rendering configuration, stored as TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::glyphs::{self, Glyphs};
use crate::ruler::TickConvention;

/// Errors that can occur while loading or saving a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("max_position must be at least 1")]
    ZeroMaxPosition,
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Last position covered by the dense ruler of the full-sequences view.
    /// Must be at least the longest sequence length.
    pub max_position: usize,
    pub ticks: TickConvention,
    /// Unicode glyphs (`·`) instead of ASCII (`.`).
    pub fancy_glyphs: bool,
    /// Fill unlabelled ruler columns with a glyph instead of leaving them blank.
    pub ruler_filler: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_position: 549,
            ticks: TickConvention::default(),
            fancy_glyphs: true,
            ruler_filler: false,
        }
    }
}

impl RenderConfig {
    pub fn glyphs(&self) -> Glyphs {
        glyphs::select(self.fancy_glyphs)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_position == 0 {
            return Err(ConfigError::ZeroMaxPosition);
        }
        Ok(())
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> ConfigResult<RenderConfig> {
    let contents = std::fs::read_to_string(path)?;
    let config: RenderConfig = toml::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &RenderConfig) -> ConfigResult<()> {
    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}
