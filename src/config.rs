//! Configuration module
//!
//! The charger's static identity lives in a small file read once at startup,
//! YAML by default (`config.yml`) or TOML when the path ends in `.toml`:
//!
//! ```yaml
//! location:
//!   latitude: 41.31
//!   longitude: 69.28
//! uuid: 3f1c2a9e-charger-01
//! logging:
//!   level: info
//!   format: text
//! server:
//!   host: 0.0.0.0
//!   shutdown_timeout: 30
//! ```
//!
//! The listening port is never configured; it is assigned by the OS at bind.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ChargerInfo;

/// Errors that prevent the agent from establishing its identity.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Problem reading configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Error parsing TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// On-disk configuration format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// API server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind; the port is always OS-assigned
    pub host: String,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            shutdown_timeout: 30,
        }
    }
}

/// Complete agent configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(flatten)]
    pub charger: ChargerInfo,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl AppConfig {
    /// Build a configuration with default logging and server sections.
    pub fn new(charger: ChargerInfo) -> Self {
        Self {
            charger,
            logging: LoggingConfig::default(),
            server: ServerConfig::default(),
        }
    }

    /// Read and parse the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, ConfigFormat::from_path(path))
    }

    pub fn parse(contents: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        Ok(match format {
            ConfigFormat::Yaml => serde_yaml::from_str(contents)?,
            ConfigFormat::Toml => toml::from_str(contents)?,
        })
    }
}

/// Configuration file looked up relative to the working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config.yml")
}
