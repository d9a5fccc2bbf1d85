//! Application configuration management.
//!
//! Configuration is layered with the `config` crate: `config/default`,
//! then `config/{RUN_MODE}`, then `TALLY__*` environment variables. The same
//! layered tree serves two consumers: the typed [`AppConfig`] used at startup
//! and the [`ConfigurationSource`] key lookup the transfer engine reads on
//! every attempt.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

/// Errors raised by a [`ConfigurationSource`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The key is absent from every configuration layer.
    #[error("No configuration value found for key '{0}'")]
    Missing(String),

    /// The key exists but cannot be read as a scalar value.
    #[error("Configuration value for key '{key}' is unreadable: {reason}")]
    Unreadable {
        /// The requested key.
        key: String,
        /// Why the value could not be read.
        reason: String,
    },
}

/// Key/value access to runtime configuration.
///
/// Keys are matched case-insensitively.
pub trait ConfigurationSource: Send + Sync {
    /// Returns the raw string value stored under `key`.
    fn get_value(&self, key: &str) -> Result<String, ConfigurationError>;
}

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Layered configuration tree backed by the `config` crate.
#[derive(Debug, Clone)]
pub struct Settings {
    raw: config::Config,
}

impl Settings {
    /// Environment variable prefix, e.g. `TALLY__DATABASE__URL`.
    pub const ENV_PREFIX: &'static str = "TALLY";

    /// Loads the layered configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a present config file cannot be parsed.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let raw = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix(Self::ENV_PREFIX).separator("__"))
            .build()?;

        Ok(Self { raw })
    }

    /// Wraps an already-built configuration tree.
    #[must_use]
    pub const fn from_config(raw: config::Config) -> Self {
        Self { raw }
    }

    /// Deserializes the typed application configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing or has the wrong type.
    pub fn app_config(&self) -> Result<AppConfig, config::ConfigError> {
        self.raw.clone().try_deserialize()
    }
}

impl ConfigurationSource for Settings {
    fn get_value(&self, key: &str) -> Result<String, ConfigurationError> {
        match self.raw.get_string(&key.to_lowercase()) {
            Ok(value) => Ok(value),
            Err(config::ConfigError::NotFound(_)) => {
                Err(ConfigurationError::Missing(key.to_string()))
            }
            Err(e) => Err(ConfigurationError::Unreadable {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

/// In-memory configuration source.
#[derive(Debug, Clone, Default)]
pub struct StaticConfig {
    values: HashMap<String, String>,
}

impl StaticConfig {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a value.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.values.insert(key.to_lowercase(), value.into());
        self
    }
}

impl ConfigurationSource for StaticConfig {
    fn get_value(&self, key: &str) -> Result<String, ConfigurationError> {
        self.values
            .get(&key.to_lowercase())
            .cloned()
            .ok_or_else(|| ConfigurationError::Missing(key.to_string()))
    }
}
