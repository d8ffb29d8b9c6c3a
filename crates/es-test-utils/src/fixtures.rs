//! Canned Elasticsearch monitoring responses.
//!
//! Shapes follow the 1.x/2.x monitoring APIs the probe reads. Values are
//! distinct per field so a test can tell which one was extracted.

use serde_json::{json, Value};

/// Node id used in every node stats fixture.
pub const LOCAL_NODE_ID: &str = "Zt8kQ3vPRjGd1n2mXwYb4A";

pub const HEAP_USED_PERCENT: u64 = 42;
pub const HEAP_USED_IN_BYTES: u64 = 451_215_360;
pub const HEAP_MAX_IN_BYTES: u64 = 1_065_025_536;
pub const YOUNG_USED_IN_BYTES: u64 = 71_565_312;
pub const OLD_USED_IN_BYTES: u64 = 370_731_520;
pub const SURVIVOR_USED_IN_BYTES: u64 = 8_918_528;
pub const MERGES_TOTAL_SIZE_IN_BYTES: u64 = 1_873_920_000;
pub const FILTER_CACHE_MEMORY_IN_BYTES: u64 = 2_048_576;
pub const FIELDDATA_MEMORY_IN_BYTES: u64 = 6_553_600;
pub const CLUSTER_HEAP_MAX_IN_BYTES: u64 = 3_195_076_608;
pub const CLUSTER_HEAP_USED_IN_BYTES: u64 = 1_353_646_080;

/// `GET /`
pub fn root_info() -> Value {
    json!({
        "name": "es-node-1",
        "cluster_name": "test-cluster",
        "version": {
            "number": "1.7.6",
            "lucene_version": "4.10.4"
        },
        "tagline": "You Know, for Search"
    })
}

/// `GET /_cluster/health` with the given status.
pub fn cluster_health(status: &str) -> Value {
    json!({
        "cluster_name": "test-cluster",
        "status": status,
        "timed_out": false,
        "number_of_nodes": 3,
        "number_of_data_nodes": 3,
        "active_primary_shards": 15,
        "active_shards": 30,
        "relocating_shards": 1,
        "initializing_shards": 0,
        "unassigned_shards": 2,
        "number_of_pending_tasks": 4
    })
}

/// `GET /_cluster/stats`
pub fn cluster_stats() -> Value {
    json!({
        "cluster_name": "test-cluster",
        "status": "green",
        "indices": { "count": 5 },
        "nodes": {
            "count": { "total": 3 },
            "jvm": {
                "max_uptime_in_millis": 86_400_000,
                "mem": {
                    "heap_used_in_bytes": CLUSTER_HEAP_USED_IN_BYTES,
                    "heap_max_in_bytes": CLUSTER_HEAP_MAX_IN_BYTES
                },
                "threads": 120
            }
        }
    })
}

/// `GET /_nodes/_local/stats/jvm`
pub fn node_jvm_stats() -> Value {
    json!({
        "cluster_name": "test-cluster",
        "nodes": {
            LOCAL_NODE_ID: {
                "name": "es-node-1",
                "host": "127.0.0.1",
                "jvm": {
                    "uptime_in_millis": 86_400_000,
                    "mem": {
                        "heap_used_in_bytes": HEAP_USED_IN_BYTES,
                        "heap_used_percent": HEAP_USED_PERCENT,
                        "heap_committed_in_bytes": HEAP_MAX_IN_BYTES,
                        "heap_max_in_bytes": HEAP_MAX_IN_BYTES,
                        "non_heap_used_in_bytes": 58_000_000,
                        "pools": {
                            "young": {
                                "used_in_bytes": YOUNG_USED_IN_BYTES,
                                "max_in_bytes": 139_591_680
                            },
                            "survivor": {
                                "used_in_bytes": SURVIVOR_USED_IN_BYTES,
                                "max_in_bytes": 17_432_576
                            },
                            "old": {
                                "used_in_bytes": OLD_USED_IN_BYTES,
                                "max_in_bytes": 908_001_280
                            }
                        }
                    }
                }
            }
        }
    })
}

/// `GET /_nodes/_local/stats/indices`
pub fn node_indices_stats() -> Value {
    json!({
        "cluster_name": "test-cluster",
        "nodes": {
            LOCAL_NODE_ID: {
                "name": "es-node-1",
                "indices": {
                    "docs": { "count": 1000, "deleted": 3 },
                    "merges": {
                        "current": 0,
                        "total": 212,
                        "total_size_in_bytes": MERGES_TOTAL_SIZE_IN_BYTES
                    },
                    "filter_cache": {
                        "memory_size_in_bytes": FILTER_CACHE_MEMORY_IN_BYTES,
                        "evictions": 0
                    },
                    "fielddata": {
                        "memory_size_in_bytes": FIELDDATA_MEMORY_IN_BYTES,
                        "evictions": 0
                    }
                }
            }
        }
    })
}

/// Node stats with no node in it, as returned when `_local` matches nothing.
pub fn empty_node_stats() -> Value {
    json!({ "cluster_name": "test-cluster", "nodes": {} })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_fixtures_have_single_local_node() {
        for stats in [node_jvm_stats(), node_indices_stats()] {
            let nodes = stats["nodes"].as_object().unwrap();
            assert_eq!(nodes.len(), 1);
            assert!(nodes.contains_key(LOCAL_NODE_ID));
        }
    }

    #[test]
    fn test_cluster_health_status_is_parameterised() {
        assert_eq!(cluster_health("red")["status"], "red");
    }
}
