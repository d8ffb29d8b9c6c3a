//! Metric dispatch table.
//!
//! Each scope owns a fixed table mapping a metric name to the handler that
//! knows which monitoring endpoint serves it and where the value lives.

use crate::errors::MetricsError;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Top-level metric category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Cluster-wide health and statistics.
    Cluster,
    /// Statistics of the node the client is bound to.
    Node,
}

impl Scope {
    pub const ALL: [Scope; 2] = [Scope::Cluster, Scope::Node];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Cluster => "cluster",
            Scope::Node => "node",
        }
    }

    /// Metric table for this scope.
    pub fn checks(&self) -> &'static [(&'static str, Handler)] {
        match self {
            Scope::Cluster => CLUSTER_CHECKS,
            Scope::Node => NODE_CHECKS,
        }
    }

    /// Look up the handler for `metric`, if the scope supports it.
    pub fn handler_for(&self, metric: &str) -> Option<Handler> {
        self.checks()
            .iter()
            .find(|(name, _)| *name == metric)
            .map(|(_, handler)| *handler)
    }

    /// Names of all metrics supported by this scope, in table order.
    pub fn supported_metrics(&self) -> impl Iterator<Item = &'static str> {
        self.checks().iter().map(|(name, _)| *name)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cluster" => Ok(Scope::Cluster),
            "node" => Ok(Scope::Node),
            _ => Err(()),
        }
    }
}

/// Fetch-and-extract routine for a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// Top-level field of `GET /_cluster/health`.
    ClusterHealth,
    /// `nodes.jvm.mem.<metric>` of `GET /_cluster/stats`.
    ClusterMemStats,
    /// JVM memory of the local node.
    NodeMemStats,
    /// Index memory of the local node.
    NodeIndexStats,
}

impl Handler {
    pub fn as_str(&self) -> &'static str {
        match self {
            Handler::ClusterHealth => "cluster_health",
            Handler::ClusterMemStats => "cluster_mem_stats",
            Handler::NodeMemStats => "node_mem_stats",
            Handler::NodeIndexStats => "node_index_stats",
        }
    }
}

const CLUSTER_CHECKS: &[(&str, Handler)] = &[
    ("active_primary_shards", Handler::ClusterHealth),
    ("active_shards", Handler::ClusterHealth),
    ("number_of_pending_tasks", Handler::ClusterHealth),
    ("relocating_shards", Handler::ClusterHealth),
    ("status", Handler::ClusterHealth),
    ("unassigned_shards", Handler::ClusterHealth),
    ("number_of_nodes", Handler::ClusterHealth),
    ("heap_max_in_bytes", Handler::ClusterMemStats),
    ("heap_used_in_bytes", Handler::ClusterMemStats),
];

const NODE_CHECKS: &[(&str, Handler)] = &[
    ("heap_pool_young_gen_mem", Handler::NodeMemStats),
    ("heap_pool_old_gen_mem", Handler::NodeMemStats),
    ("heap_pool_survivor_gen_mem", Handler::NodeMemStats),
    ("heap_max_in_bytes", Handler::NodeMemStats),
    ("heap_used_in_bytes", Handler::NodeMemStats),
    ("heap_used_percent", Handler::NodeMemStats),
    ("total_filter_cache_mem", Handler::NodeIndexStats),
    ("total_field_data_mem", Handler::NodeIndexStats),
    ("total_merges_mem", Handler::NodeIndexStats),
];

/// A validated `(scope, metric)` pair and the handler that serves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricRequest {
    pub scope: Scope,
    pub metric: String,
    pub handler: Handler,
}

impl MetricRequest {
    /// Resolve raw CLI arguments against the dispatch table.
    ///
    /// An unknown scope and an unknown metric are both reported as
    /// `UnsupportedMetric`.
    pub fn parse(scope: &str, metric: &str) -> Result<Self, MetricsError> {
        let parsed_scope: Scope = scope
            .parse()
            .map_err(|()| MetricsError::unsupported(scope, metric))?;

        let handler = parsed_scope
            .handler_for(metric)
            .ok_or_else(|| MetricsError::unsupported(scope, metric))?;

        Ok(Self {
            scope: parsed_scope,
            metric: metric.to_string(),
            handler,
        })
    }
}

/// A single value extracted from a monitoring response.
///
/// Strings print bare (`green`, not `"green"`); everything else prints as JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricValue(pub Value);

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

/// Help text listing every supported metric, grouped by scope.
pub fn supported_metrics_help() -> String {
    let mut help = String::from("Supported metrics:\n");
    for scope in Scope::ALL {
        help.push_str(&format!("\n  {scope}:\n"));
        for metric in scope.supported_metrics() {
            help.push_str(&format!("    - {metric}\n"));
        }
    }
    help
}
