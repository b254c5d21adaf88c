// src/config/mod.rs
//! Runtime settings.
//!
//! Layered through the `config` crate: built-in defaults, then an optional
//! `silver.toml`, then `SILVER_*` environment variables.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, SilverError};

const CONFIG_FILENAME: &str = "silver.toml";

/// Environment variable pointing at an explicit config file
pub const CONFIG_PATH_ENV: &str = "SILVER_CONFIG";

const ENV_PREFIX: &str = "SILVER";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub analyze_delay_ms: u64,
    pub retry_delay_ms: u64,
    pub failure_rate: f64,
    pub seed: Option<u64>,
    pub discard_stale_resolutions: bool,
    pub export_dir: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            analyze_delay_ms: 1500,
            retry_delay_ms: 1200,
            failure_rate: 0.1,
            seed: None,
            discard_stale_resolutions: true,
            export_dir: None,
            log_filter: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load from `$SILVER_CONFIG`, or `<config dir>/silver/silver.toml` when unset.
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .or_else(default_config_path);
        Self::load_layers(path.as_deref(), true)
    }

    /// Load from a specific file. Environment variables are not consulted.
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::load_layers(Some(path), false)
    }

    fn load_layers(path: Option<&Path>, with_env: bool) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        if with_env {
            builder = builder.add_source(
                config::Environment::with_prefix(ENV_PREFIX).try_parsing(true)
            );
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.failure_rate) {
            return Err(SilverError::InvalidConfig(format!(
                "failure_rate must be between 0 and 1, got {}",
                self.failure_rate
            )));
        }
        Ok(())
    }

    pub fn analyze_delay(&self) -> Duration {
        Duration::from_millis(self.analyze_delay_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("silver").join(CONFIG_FILENAME))
}
