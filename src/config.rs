//! Environment-sourced configuration.
//!
//! The process is configured entirely by environment variables, read once at
//! startup into a typed struct and validated eagerly so a missing required
//! setting fails before the loop ever begins:
//!
//! - `SECRET_FILE_PATH`: directory containing the `username`, `password` and
//!   `registries` files (the Secret volumeMount). Required.
//! - `DOCKER_CONFIG`: path to write the rendered config to (the hostPath
//!   volumeMount). Required.
//! - `SLEEP_INTERVAL`: seconds between regenerations. Default 120.
//! - `DEBUG`: presence enables debug logging.

use std::path::PathBuf;
use std::time::Duration;

use figment::providers::Env;
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required environment variable was absent at startup.
    #[error("required environment variable {0} is not set")]
    MissingVar(String),

    /// `SLEEP_INTERVAL` was zero; the loop would spin without sleeping.
    #[error("invalid SLEEP_INTERVAL: must be a positive number of seconds")]
    InvalidSleepInterval,

    /// An environment variable could not be parsed into its typed field.
    #[error("failed to read configuration from environment: {0}")]
    Extract(#[from] figment::Error),
}

/// Runtime configuration for the refresh loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RefresherConfig {
    /// Directory holding the `username`, `password` and `registries` files.
    pub secret_file_path: PathBuf,

    /// Destination path for the rendered registry auth config.
    pub docker_config: PathBuf,

    /// Seconds to sleep between reconciliations.
    #[serde(default = "default_sleep_interval")]
    pub sleep_interval: u64,

    /// Verbose logging, set from the presence of `DEBUG`.
    #[serde(skip)]
    pub debug: bool,
}

const fn default_sleep_interval() -> u64 {
    120
}

impl RefresherConfig {
    /// Load and validate configuration from the process environment.
    ///
    /// A missing required variable or an unparseable value is a startup
    /// failure; nothing is re-read from the environment after this point.
    pub fn from_env() -> Result<Self, ConfigError> {
        let figment = Figment::from(Env::raw().only(&[
            "SECRET_FILE_PATH",
            "DOCKER_CONFIG",
            "SLEEP_INTERVAL",
        ]));
        let mut config = Self::extract(figment)?;
        // Presence of DEBUG is the toggle, whatever its value.
        config.debug = Env::var("DEBUG").is_some();
        Ok(config)
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(|e| {
            if let figment::error::Kind::MissingField(field) = &e.kind {
                ConfigError::MissingVar(field.to_uppercase())
            } else {
                ConfigError::Extract(e)
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration after loading
    fn validate(&self) -> Result<(), ConfigError> {
        if self.sleep_interval == 0 {
            return Err(ConfigError::InvalidSleepInterval);
        }
        Ok(())
    }

    /// Sleep interval as a [`Duration`].
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.sleep_interval)
    }
}
