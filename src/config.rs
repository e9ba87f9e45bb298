use crate::journal::JournalMode;
use crate::pointer::PointerConfig;
use crate::ring::MAX_PUSHED_EVENTS;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    pub journal: JournalMode,
    pub journal_dir: PathBuf,
    pub pushed_capacity: usize,
    pub pointer: PointerConfig,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            journal: JournalMode::Off,
            journal_dir: PathBuf::from("."),
            pushed_capacity: MAX_PUSHED_EVENTS,
            pointer: PointerConfig::default(),
        }
    }
}

impl LoopConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.pushed_capacity.is_power_of_two() {
            return Err(ConfigError::Invalid(format!(
                "pushed_capacity {} is not a power of two",
                self.pushed_capacity
            )));
        }
        if !(self.pointer.speed.is_finite() && self.pointer.speed > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "pointer.speed {} must be positive",
                self.pointer.speed
            )));
        }
        if self.pointer.axis_max <= 0 {
            return Err(ConfigError::Invalid(format!(
                "pointer.axis_max {} must be positive",
                self.pointer.axis_max
            )));
        }
        if self.pointer.x_axis == self.pointer.y_axis {
            return Err(ConfigError::Invalid(
                "pointer.x_axis and pointer.y_axis must differ".into(),
            ));
        }
        Ok(())
    }
}
