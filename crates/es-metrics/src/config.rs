//! Probe configuration.
//!
//! Connection settings come from environment variables with documented
//! defaults. CLI flags are layered on top through the `with_*` builders.

use std::collections::HashMap;
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Default Elasticsearch host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default Elasticsearch HTTP port.
pub const DEFAULT_PORT: u16 = 9200;

/// Default whole-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Connect timeout, capped by the request timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Log output format for the stderr subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub request_timeout: Duration,
    pub log_format: LogFormat,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid port '{0}': expected an integer between 1 and 65535")]
    InvalidPort(String),

    #[error("Invalid timeout '{0}': expected a positive number of seconds")]
    InvalidTimeout(String),

    #[error("Invalid log format '{0}': expected 'text' or 'json'")]
    InvalidLogFormat(String),

    #[error("Host must not be empty")]
    EmptyHost,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing)
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(host) = vars.get("ES_HOST") {
            config = config.with_host(host)?;
        }

        if let Some(port) = vars.get("ES_PORT") {
            config = config.with_port(parse_port(port)?);
        }

        if let Some(timeout) = vars.get("ES_TIMEOUT_SECS") {
            config = config.with_request_timeout(parse_timeout_secs(timeout)?);
        }

        if let Some(format) = vars.get("ES_METRICS_LOG_FORMAT") {
            config.log_format = match format.to_ascii_lowercase().as_str() {
                "text" => LogFormat::Text,
                "json" => LogFormat::Json,
                _ => return Err(ConfigError::InvalidLogFormat(format.clone())),
            };
        }

        Ok(config)
    }

    /// Override the Elasticsearch host.
    pub fn with_host(mut self, host: &str) -> Result<Self, ConfigError> {
        let host = host.trim();
        if host.is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        self.host = host.to_string();
        Ok(self)
    }

    /// Override the Elasticsearch HTTP port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Override the whole-request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Base URL of the Elasticsearch HTTP API, without a trailing slash.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Connect timeout actually applied to the HTTP client.
    pub fn connect_timeout(&self) -> Duration {
        DEFAULT_CONNECT_TIMEOUT.min(self.request_timeout)
    }
}

/// Parse a port number, rejecting 0.
pub fn parse_port(value: &str) -> Result<u16, ConfigError> {
    match value.trim().parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(ConfigError::InvalidPort(value.to_string())),
    }
}

/// Parse a timeout given in whole seconds, rejecting 0.
pub fn parse_timeout_secs(value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(value.to_string())),
    }
}
