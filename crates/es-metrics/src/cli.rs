//! Command-line interface.
//!
//! ```bash
//! # Cluster status
//! elasticsearch-metrics cluster status
//!
//! # Heap used on the local node
//! elasticsearch-metrics node heap_used_in_bytes
//! ```

use crate::config::{parse_port, parse_timeout_secs, Config};
use crate::errors::{MetricsError, ARGUMENT_COUNT_MESSAGE, EXIT_USAGE};
use crate::metrics::supported_metrics_help;
use clap::error::ErrorKind;
use clap::Parser;
use std::time::Duration;

/// Print a single Elasticsearch cluster or node metric
#[derive(Parser, Debug, Clone)]
#[command(name = "elasticsearch-metrics")]
#[command(version, about, long_about = None)]
#[command(after_help = supported_metrics_help())]
pub struct Cli {
    /// Metric scope: `cluster` or `node`
    pub scope: String,

    /// Metric name within the scope
    pub metric: String,

    /// Elasticsearch host (overrides ES_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Elasticsearch HTTP port (overrides ES_PORT)
    #[arg(long, value_parser = parse_port)]
    pub port: Option<u16>,

    /// Request timeout in seconds (overrides ES_TIMEOUT_SECS)
    #[arg(long = "timeout-secs", value_parser = parse_timeout_secs)]
    pub timeout: Option<Duration>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Layer CLI overrides on top of the environment configuration.
    pub fn apply(&self, mut config: Config) -> Result<Config, MetricsError> {
        if let Some(host) = &self.host {
            config = config.with_host(host)?;
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if let Some(timeout) = self.timeout {
            config = config.with_request_timeout(timeout);
        }
        Ok(config)
    }
}

/// Print a parse error and return the process exit code for it.
///
/// Help and version requests succeed; everything else is a usage error.
pub fn report_parse_error(err: &clap::Error) -> u8 {
    let code = parse_error_exit_code(err);
    if err.kind() == ErrorKind::MissingRequiredArgument {
        eprintln!("{ARGUMENT_COUNT_MESSAGE}");
    }
    // Nowhere to report a failed stderr write; the exit code still signals it.
    let _ = err.print();
    code
}

pub fn parse_error_exit_code(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => EXIT_USAGE,
    }
}
