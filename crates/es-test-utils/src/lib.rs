//! # ES Test Utilities
//!
//! Shared test utilities for the Elasticsearch metrics probe.
//!
//! ## Modules
//!
//! - `fixtures` - Canned monitoring API responses
//! - `mock_es` - `wiremock`-backed mock Elasticsearch endpoint
//!
//! ## Usage
//!
//! ```rust,ignore
//! use es_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() {
//!     let es = MockElasticsearch::start().await;
//!     es.mount_json(NODE_JVM_STATS, fixtures::node_jvm_stats()).await;
//!
//!     let value = es_metrics::collect_metric(&es.config(), "node", "heap_used_percent")
//!         .await
//!         .unwrap();
//!     assert_eq!(value.to_string(), fixtures::HEAP_USED_PERCENT.to_string());
//! }
//! ```

pub mod fixtures;
pub mod mock_es;

pub use mock_es::*;
