#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for photofetch
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/photofetch/config.toml)
//! - Environment variables
//! - CLI flags (applied by the binary)

pub mod constants;

pub use constants::{DEFAULT_TIMEOUT_SECS, SAMPLE_PHOTOS};

use photofetch_errors::{ConfigError, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub harness: HarnessConfig,

    #[serde(default)]
    pub network: NetworkConfig,
}

/// Download harness configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    #[serde(default = "default_harness_timeout")]
    pub timeout_secs: u64,
    /// Cases to run; empty means the built-in sample photos
    #[serde(default)]
    pub cases: Vec<CaseConfig>,
}

/// A single named URL to check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseConfig {
    pub name: String,
    pub url: String,
}

/// Network configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_timeout")]
    pub timeout: u64, // seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64, // seconds
    #[serde(default = "default_retries")]
    pub retries: u32,
    #[serde(default = "default_retry_delay")]
    pub retry_delay: u64, // milliseconds
    #[serde(default = "default_max_photo_size")]
    pub max_photo_size: u64, // bytes
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            cases: Vec::new(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            connect_timeout: 10,
            retries: 2,
            retry_delay: 250,
            max_photo_size: 32 * 1024 * 1024, // 32MB
        }
    }
}

// Default value functions for serde
fn default_harness_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_retries() -> u32 {
    2
}

fn default_retry_delay() -> u64 {
    250
}

fn default_max_photo_size() -> u64 {
    32 * 1024 * 1024
}

impl HarnessConfig {
    /// Timeout budget for a single case
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Configured cases, falling back to the sample photos
    #[must_use]
    pub fn cases_or_samples(&self) -> Vec<CaseConfig> {
        if self.cases.is_empty() {
            SAMPLE_PHOTOS
                .iter()
                .map(|(name, url)| CaseConfig {
                    name: (*name).to_string(),
                    url: (*url).to_string(),
                })
                .collect()
        } else {
            self.cases.clone()
        }
    }
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir.join("photofetch").join("config.toml"))
    }

    /// Directory for debug log files
    #[must_use]
    pub fn log_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(constants::LOG_DIR_NAME)
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, if the file contents
    /// contain invalid TOML syntax, or if a value fails validation.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        let config: Self = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        config.validate()?;

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let config_path = Self::default_path()?;

        if config_path.exists() {
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        // PHOTOFETCH_TIMEOUT_SECS
        if let Ok(timeout) = std::env::var("PHOTOFETCH_TIMEOUT_SECS") {
            self.harness.timeout_secs = timeout.parse().map_err(|_| ConfigError::InvalidValue {
                field: "PHOTOFETCH_TIMEOUT_SECS".to_string(),
                value: timeout,
            })?;
        }

        // PHOTOFETCH_RETRIES
        if let Ok(retries) = std::env::var("PHOTOFETCH_RETRIES") {
            self.network.retries = retries.parse().map_err(|_| ConfigError::InvalidValue {
                field: "PHOTOFETCH_RETRIES".to_string(),
                value: retries,
            })?;
        }

        self.validate()
    }

    /// Reject values the harness cannot run with
    ///
    /// # Errors
    ///
    /// Returns an error for a zero timeout or a case with an empty name or URL.
    pub fn validate(&self) -> Result<(), Error> {
        if self.harness.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "harness.timeout_secs".to_string(),
                value: "0".to_string(),
            }
            .into());
        }

        if let Some(case) = self
            .harness
            .cases
            .iter()
            .find(|c| c.name.trim().is_empty() || c.url.trim().is_empty())
        {
            return Err(ConfigError::Invalid {
                message: format!("case '{}' needs both a name and a url", case.name),
            }
            .into());
        }

        Ok(())
    }
}
