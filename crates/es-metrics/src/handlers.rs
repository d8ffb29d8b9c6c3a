//! Metric handlers.
//!
//! Each handler issues exactly one monitoring request and pulls one field out
//! of the nested response. Extraction is split from fetching so the response
//! shapes can be tested without a server.

use crate::client::{EsClient, NodeStatsGroup};
use crate::errors::MetricsError;
use crate::metrics::{Handler, MetricRequest, MetricValue};
use serde_json::Value;
use tracing::{debug, instrument};

/// Fetch the value for a resolved metric request.
#[instrument(skip(client), fields(scope = %request.scope, metric = %request.metric, handler = request.handler.as_str()))]
pub async fn collect(
    client: &EsClient,
    request: &MetricRequest,
) -> Result<MetricValue, MetricsError> {
    let metric = request.metric.as_str();

    let value = match request.handler {
        Handler::ClusterHealth => {
            let health = client.cluster_health().await?;
            extract_cluster_health(&health, metric)?
        }
        Handler::ClusterMemStats => {
            let stats = client.cluster_stats().await?;
            extract_cluster_mem(&stats, metric)?
        }
        Handler::NodeMemStats => {
            let stats = client.local_node_stats(NodeStatsGroup::Jvm).await?;
            extract_node_mem(&stats, metric)?
        }
        Handler::NodeIndexStats => {
            let stats = client.local_node_stats(NodeStatsGroup::Indices).await?;
            extract_node_index(&stats, metric)?
        }
    };

    debug!(target: "es.handlers", value = %value, "Metric collected");
    Ok(value)
}

/// `<metric>` from a cluster health document.
pub fn extract_cluster_health(health: &Value, metric: &str) -> Result<MetricValue, MetricsError> {
    lookup(health, &[metric])
}

/// `nodes.jvm.mem.<metric>` from a cluster stats document.
pub fn extract_cluster_mem(stats: &Value, metric: &str) -> Result<MetricValue, MetricsError> {
    lookup(stats, &["nodes", "jvm", "mem", metric])
}

/// JVM memory field of the local node from a `jvm` node stats document.
///
/// Pool metrics are matched by substring and read from the pool's
/// `used_in_bytes`; anything else indexes `jvm.mem` directly.
pub fn extract_node_mem(stats: &Value, metric: &str) -> Result<MetricValue, MetricsError> {
    let node_id = local_node_id(stats)?;
    let mut path = vec!["nodes", node_id, "jvm", "mem"];

    if metric.contains("heap_used_percent") {
        path.push(metric);
    } else if metric.contains("pool_young") {
        path.extend(["pools", "young", "used_in_bytes"]);
    } else if metric.contains("pool_old") {
        path.extend(["pools", "old", "used_in_bytes"]);
    } else if metric.contains("pool_survivor") {
        path.extend(["pools", "survivor", "used_in_bytes"]);
    } else {
        path.push(metric);
    }

    lookup(stats, &path)
}

/// Index memory field of the local node from an `indices` node stats document.
pub fn extract_node_index(stats: &Value, metric: &str) -> Result<MetricValue, MetricsError> {
    let field: [&str; 2] = match metric {
        "total_merges_mem" => ["merges", "total_size_in_bytes"],
        "total_filter_cache_mem" => ["filter_cache", "memory_size_in_bytes"],
        "total_field_data_mem" => ["fielddata", "memory_size_in_bytes"],
        _ => return Err(MetricsError::unsupported("node", metric)),
    };

    let node_id = local_node_id(stats)?;
    let [group, leaf] = field;
    lookup(stats, &["nodes", node_id, "indices", group, leaf])
}

/// Id of the single node in a `_local` node stats response.
fn local_node_id(stats: &Value) -> Result<&str, MetricsError> {
    stats
        .get("nodes")
        .and_then(Value::as_object)
        .and_then(|nodes| nodes.keys().next())
        .map(String::as_str)
        .ok_or(MetricsError::NoLocalNode)
}

fn lookup(document: &Value, path: &[&str]) -> Result<MetricValue, MetricsError> {
    path.iter()
        .try_fold(document, |node, key| node.get(*key))
        .cloned()
        .map(MetricValue)
        .ok_or_else(|| MetricsError::MissingField {
            path: path.join("."),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node_jvm_stats() -> Value {
        json!({
            "cluster_name": "test",
            "nodes": {
                "aBcD1234": {
                    "name": "es-node-1",
                    "jvm": {
                        "mem": {
                            "heap_used_in_bytes": 536870912,
                            "heap_used_percent": 25,
                            "heap_max_in_bytes": 2147483648u64,
                            "pools": {
                                "young": { "used_in_bytes": 1000 },
                                "old": { "used_in_bytes": 2000 },
                                "survivor": { "used_in_bytes": 3000 }
                            }
                        }
                    }
                }
            }
        })
    }

    fn node_indices_stats() -> Value {
        json!({
            "nodes": {
                "aBcD1234": {
                    "indices": {
                        "merges": { "total_size_in_bytes": 11 },
                        "filter_cache": { "memory_size_in_bytes": 22 },
                        "fielddata": { "memory_size_in_bytes": 33 }
                    }
                }
            }
        })
    }

    #[test]
    fn test_cluster_health_reads_top_level_field() {
        let health = json!({"status": "yellow", "number_of_nodes": 3});

        assert_eq!(
            extract_cluster_health(&health, "status").unwrap(),
            MetricValue(json!("yellow"))
        );
        assert_eq!(
            extract_cluster_health(&health, "number_of_nodes").unwrap(),
            MetricValue(json!(3))
        );
    }

    #[test]
    fn test_cluster_mem_reads_nested_field() {
        let stats = json!({"nodes": {"jvm": {"mem": {"heap_max_in_bytes": 4096}}}});
        assert_eq!(
            extract_cluster_mem(&stats, "heap_max_in_bytes").unwrap(),
            MetricValue(json!(4096))
        );
    }

    #[test]
    fn test_node_mem_fields() {
        let stats = node_jvm_stats();
        let cases = [
            ("heap_used_percent", json!(25)),
            ("heap_pool_young_gen_mem", json!(1000)),
            ("heap_pool_old_gen_mem", json!(2000)),
            ("heap_pool_survivor_gen_mem", json!(3000)),
            ("heap_max_in_bytes", json!(2147483648u64)),
            ("heap_used_in_bytes", json!(536870912)),
        ];

        for (metric, expected) in cases {
            assert_eq!(
                extract_node_mem(&stats, metric).unwrap(),
                MetricValue(expected),
                "node {metric}"
            );
        }
    }

    #[test]
    fn test_node_index_fields() {
        let stats = node_indices_stats();
        let cases = [
            ("total_merges_mem", 11),
            ("total_filter_cache_mem", 22),
            ("total_field_data_mem", 33),
        ];

        for (metric, expected) in cases {
            assert_eq!(
                extract_node_index(&stats, metric).unwrap(),
                MetricValue(json!(expected)),
                "node {metric}"
            );
        }
    }

    #[test]
    fn test_node_index_unknown_metric() {
        let result = extract_node_index(&node_indices_stats(), "heap_used_percent");
        assert!(matches!(result, Err(MetricsError::UnsupportedMetric { .. })));
    }

    #[test]
    fn test_missing_field_reports_path() {
        let stats = json!({"nodes": {"n1": {"indices": {"merges": {}}}}});
        let err = extract_node_index(&stats, "total_filter_cache_mem").unwrap_err();
        assert!(matches!(
            err,
            MetricsError::MissingField { ref path } if path == "nodes.n1.indices.filter_cache.memory_size_in_bytes"
        ));
    }

    #[test]
    fn test_empty_nodes_is_no_local_node() {
        let stats = json!({"nodes": {}});
        assert!(matches!(
            extract_node_mem(&stats, "heap_used_percent"),
            Err(MetricsError::NoLocalNode)
        ));
        assert!(matches!(
            extract_node_index(&json!({}), "total_merges_mem"),
            Err(MetricsError::NoLocalNode)
        ));
    }

    #[test]
    fn test_lookup_does_not_descend_into_scalars() {
        let health = json!({"status": "green"});
        let result = lookup(&health, &["status", "color"]);
        assert!(matches!(result, Err(MetricsError::MissingField { .. })));
    }
}
