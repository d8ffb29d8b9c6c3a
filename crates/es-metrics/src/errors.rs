//! Probe error types.
//!
//! Every failure terminates the process. `MetricsError::exit_code` maps each
//! variant to the code reported to the calling monitoring agent.

use crate::config::ConfigError;
use thiserror::Error;

/// Exit code for any runtime failure.
pub const EXIT_FAILURE: u8 = 1;

/// Exit code for argument-parse errors.
pub const EXIT_USAGE: u8 = 2;

/// Message printed when fewer than two positional arguments are supplied.
pub const ARGUMENT_COUNT_MESSAGE: &str =
    "Positional arguments count should be 2: <scope> <metric>.";

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Connection failed.")]
    ConnectionFailed(String),

    #[error("{metric} metric is not supported for {scope} option.")]
    UnsupportedMetric { scope: String, metric: String },

    #[error("Request to {endpoint} failed with status {status}")]
    RequestFailed { endpoint: String, status: u16 },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response from {endpoint}: {reason}")]
    InvalidResponse { endpoint: String, reason: String },

    #[error("Field '{path}' missing from response")]
    MissingField { path: String },

    #[error("Node stats response contains no local node")]
    NoLocalNode,

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
}

impl MetricsError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            MetricsError::ConnectionFailed(_)
            | MetricsError::UnsupportedMetric { .. }
            | MetricsError::RequestFailed { .. }
            | MetricsError::Transport(_)
            | MetricsError::InvalidResponse { .. }
            | MetricsError::MissingField { .. }
            | MetricsError::NoLocalNode
            | MetricsError::Configuration(_) => EXIT_FAILURE,
        }
    }

    pub(crate) fn unsupported(scope: &str, metric: &str) -> Self {
        MetricsError::UnsupportedMetric {
            scope: scope.to_string(),
            metric: metric.to_string(),
        }
    }
}
