//! # Application Configuration
//!
//! Settings loaded from the environment, optionally primed from a `.env`
//! file.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `HTTP_SERVER_ADDR` | `:3142` | Bind address; a bare `:port` binds all interfaces |
//! | `UPDATE_THRESHOLD` | `1000` | Submissions between snapshot refreshes; must be positive |
//! | `REQUEST_TIMEOUT_SECS` | `10` | Per-request timeout |
//! | `SHUTDOWN_TIMEOUT_SECS` | `10` | Grace period for draining connections |
//! | `LOG_FORMAT` | `text` | `text` or `json` |
//!
//! # Examples
//!
//! ```
//! use freight_rates::infrastructure::config::AppConfig;
//! use std::collections::HashMap;
//!
//! let vars = HashMap::from([("UPDATE_THRESHOLD".to_string(), "25".to_string())]);
//! let config = AppConfig::from_vars(vars).unwrap();
//!
//! assert_eq!(config.update_threshold, 25);
//! assert_eq!(config.http_server_addr, ":3142");
//! ```

use config::{Config, Environment};
use serde::Deserialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

/// Default bind address.
pub const DEFAULT_HTTP_SERVER_ADDR: &str = ":3142";

/// Default number of submissions between snapshot refreshes.
pub const DEFAULT_UPDATE_THRESHOLD: i64 = 1000;

/// Default per-request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default shutdown grace period in seconds.
const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 10;

/// Configuration loading error.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// A source could not be read or a value had the wrong type.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// The refresh threshold is not strictly positive.
    #[error("update threshold must be a positive integer, got {0}")]
    InvalidThreshold(i64),

    /// The bind address could not be parsed.
    #[error("invalid server address: {0}")]
    InvalidAddress(String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Process configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Bind address, e.g. `:3142` or `127.0.0.1:8080`.
    #[serde(default = "default_http_server_addr")]
    pub http_server_addr: String,

    /// Submissions between snapshot refreshes.
    #[serde(default = "default_update_threshold")]
    pub update_threshold: i64,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Shutdown grace period in seconds.
    #[serde(default = "default_shutdown_timeout_secs")]
    pub shutdown_timeout_secs: u64,

    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_http_server_addr() -> String {
    DEFAULT_HTTP_SERVER_ADDR.to_string()
}

fn default_update_threshold() -> i64 {
    DEFAULT_UPDATE_THRESHOLD
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_shutdown_timeout_secs() -> u64 {
    DEFAULT_SHUTDOWN_TIMEOUT_SECS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http_server_addr: default_http_server_addr(),
            update_threshold: DEFAULT_UPDATE_THRESHOLD,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
            log_format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// A `.env` file in the working directory is read first if present;
    /// variables already set in the environment take precedence.
    ///
    /// # Errors
    ///
    /// Returns an error if a value has the wrong type or fails validation.
    pub fn load() -> Result<Self, ConfigurationError> {
        // A missing .env file is not an error.
        let _ = dotenvy::dotenv();
        Self::build(Environment::default().try_parsing(true))
    }

    /// Loads configuration from an explicit set of variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a value has the wrong type or fails validation.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigurationError> {
        Self::build(Environment::default().try_parsing(true).source(Some(vars)))
    }

    fn build(source: Environment) -> Result<Self, ConfigurationError> {
        let config: Self = Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Overrides the bind address.
    #[must_use]
    pub fn with_http_server_addr(mut self, addr: impl Into<String>) -> Self {
        self.http_server_addr = addr.into();
        self
    }

    /// Overrides the refresh threshold.
    #[must_use]
    pub fn with_update_threshold(mut self, threshold: i64) -> Self {
        self.update_threshold = threshold;
        self
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if the threshold is not positive or the address does
    /// not parse.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.update_threshold <= 0 {
            return Err(ConfigurationError::InvalidThreshold(self.update_threshold));
        }
        self.socket_addr().map(|_| ())
    }

    /// Resolves the bind address. A bare `:port` binds all interfaces.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidAddress` if the address does not
    /// parse.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigurationError> {
        let addr = self.http_server_addr.trim();
        let normalized = match addr.strip_prefix(':') {
            Some(port) => format!("0.0.0.0:{port}"),
            None => addr.to_string(),
        };
        normalized
            .parse()
            .map_err(|_| ConfigurationError::InvalidAddress(self.http_server_addr.clone()))
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Returns the shutdown grace period.
    #[must_use]
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}
