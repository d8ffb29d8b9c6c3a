//! Elasticsearch metrics probe.
//!
//! Queries the Elasticsearch cluster health, cluster stats, or local node
//! stats API for one named metric and returns its value, for use by
//! monitoring agents that expect a bare value on stdout.
//!
//! # Usage
//!
//! ```bash
//! elasticsearch-metrics cluster status
//! elasticsearch-metrics node heap_used_percent
//! elasticsearch-metrics --host es-01 --port 9200 node total_merges_mem
//! ```
//!
//! # Exit codes
//!
//! - `0`: value printed
//! - `1`: connection failure, unsupported metric, or any other runtime error
//! - `2`: wrong number of arguments

pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod metrics;
pub mod observability;

use client::EsClient;
use config::Config;
use errors::MetricsError;
use metrics::{MetricRequest, MetricValue};

/// Connect, resolve `(scope, metric)`, and fetch the value.
///
/// A failed connection check aborts before the metric is looked up, so an
/// unreachable endpoint always reports `ConnectionFailed`.
pub async fn collect_metric(
    config: &Config,
    scope: &str,
    metric: &str,
) -> Result<MetricValue, MetricsError> {
    let client = EsClient::connect(config).await?;
    let request = MetricRequest::parse(scope, metric)?;
    handlers::collect(&client, &request).await
}
