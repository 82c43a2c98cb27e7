//! Layered configuration for CityRoute.
//!
//! Sources, lowest priority first:
//!
//! 1. Built-in defaults ([`RouteConfig::default`])
//! 2. A TOML file (`cityroute.toml` unless another path is given)
//! 3. Environment variables prefixed with `CITYROUTE_`, nested keys separated
//!    by `__` (e.g. `CITYROUTE_SEARCH__MAX_PATHS=5000`)
//!
//! # Example file
//!
//! ```toml
//! [search]
//! max_paths = 100000
//! timeout_ms = 5000
//!
//! [storage]
//! data_file = "./data/edges.json"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! cors_origins = ["https://maps.example.com"]
//!
//! [logging]
//! level = "info"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::SearchBudget;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "cityroute.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "CITYROUTE_";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A source could not be read or did not match the schema.
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    /// A value was read but is out of range.
    #[error("Invalid configuration value for {key}: {message}")]
    Invalid {
        /// Dotted key of the offending value.
        key: String,
        /// What is wrong with it.
        message: String,
    },
}

/// Path search limits. Zero disables a limit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of paths one query may return.
    pub max_paths: usize,
    /// Maximum running time of one query, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_paths: 100_000,
            timeout_ms: 5_000,
        }
    }
}

/// Edge storage settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON file holding the distance records; in-memory storage when unset.
    pub data_file: Option<PathBuf>,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Origins allowed to call the API from a browser; any origin when empty.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: Vec::new(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Complete CityRoute configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RouteConfig {
    /// Path search limits.
    pub search: SearchConfig,
    /// Edge storage.
    pub storage: StorageConfig,
    /// HTTP listener.
    pub server: ServerConfig,
    /// Logging.
    pub logging: LoggingConfig,
}

impl RouteConfig {
    /// Loads from `cityroute.toml` in the working directory and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_file(DEFAULT_CONFIG_FILE)
    }

    /// Loads from the given TOML file (skipped if missing) and the environment.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::figment(path.as_ref())
            .extract::<Self>()
            .map_err(Box::new)?
            .validated()
    }

    /// Builds the layered provider without extracting it.
    #[must_use]
    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "server.host".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if let Some(origin) = self
            .server
            .cors_origins
            .iter()
            .find(|o| !(o.starts_with("http://") || o.starts_with("https://")))
        {
            return Err(ConfigError::Invalid {
                key: "server.cors_origins".to_string(),
                message: format!("{origin:?} is not an http(s) origin"),
            });
        }
        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Invalid {
                key: "logging.level".to_string(),
                message: format!("expected one of {}", LOG_LEVELS.join(", ")),
            });
        }
        Ok(())
    }

    fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }

    /// Path search budget derived from the `search` section.
    #[must_use]
    pub fn search_budget(&self) -> SearchBudget {
        SearchBudget::new(
            Some(self.search.max_paths).filter(|&n| n > 0),
            Some(self.search.timeout_ms)
                .filter(|&ms| ms > 0)
                .map(Duration::from_millis),
        )
    }
}
