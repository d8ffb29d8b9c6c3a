//! Mock Elasticsearch server for probe testing.
//!
//! Wraps a `wiremock::MockServer` that answers the connection check and lets
//! a test mount one monitoring endpoint at a time.
//!
//! # Example
//!
//! ```rust,ignore
//! use es_test_utils::{fixtures, MockElasticsearch};
//!
//! let es = MockElasticsearch::start().await;
//! es.mount_json("/_cluster/health", fixtures::cluster_health("green")).await;
//!
//! let value = es_metrics::collect_metric(&es.config(), "cluster", "status").await?;
//! assert_eq!(value.to_string(), "green");
//! ```

use crate::fixtures;
use es_metrics::config::Config;
use serde_json::Value;
use std::net::TcpListener;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CLUSTER_HEALTH: &str = "/_cluster/health";
pub const CLUSTER_STATS: &str = "/_cluster/stats";
pub const NODE_JVM_STATS: &str = "/_nodes/_local/stats/jvm";
pub const NODE_INDICES_STATS: &str = "/_nodes/_local/stats/indices";

/// Every monitoring endpoint the probe may call after connecting.
pub const METRIC_ENDPOINTS: [&str; 4] = [
    CLUSTER_HEALTH,
    CLUSTER_STATS,
    NODE_JVM_STATS,
    NODE_INDICES_STATS,
];

/// Mock Elasticsearch HTTP endpoint.
///
/// Expectations set through `mount_json` and `expect_no_metric_requests` are
/// verified when the mock is dropped.
pub struct MockElasticsearch {
    server: MockServer,
}

impl MockElasticsearch {
    /// Start a mock whose connection check succeeds.
    pub async fn start() -> Self {
        let mock = Self::bare().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::root_info()))
            .mount(&mock.server)
            .await;
        mock
    }

    /// Start a mock whose connection check answers with `status`.
    pub async fn start_rejecting(status: u16) -> Self {
        let mock = Self::bare().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&mock.server)
            .await;
        mock
    }

    async fn bare() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Probe configuration pointing at this mock.
    pub fn config(&self) -> Config {
        Config::default()
            .with_host(&self.host())
            .expect("mock host is never empty")
            .with_port(self.port())
    }

    pub fn host(&self) -> String {
        self.server.address().ip().to_string()
    }

    pub fn port(&self) -> u16 {
        self.server.address().port()
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Serve `body` on `GET endpoint`, expecting exactly one request.
    pub async fn mount_json(&self, endpoint: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .named(endpoint)
            .mount(&self.server)
            .await;
    }

    /// Serve `body` on `GET endpoint` only after `delay` has passed.
    pub async fn mount_delayed_json(&self, endpoint: &str, body: Value, delay: Duration) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(body)
                    .set_delay(delay),
            )
            .named(endpoint)
            .mount(&self.server)
            .await;
    }

    /// Answer `GET endpoint` with a bare status code.
    pub async fn mount_status(&self, endpoint: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Fail verification if any monitoring endpoint is called.
    pub async fn expect_no_metric_requests(&self) {
        for endpoint in METRIC_ENDPOINTS {
            Mock::given(method("GET"))
                .and(path(endpoint))
                .respond_with(ResponseTemplate::new(200))
                .expect(0)
                .named(endpoint)
                .mount(&self.server)
                .await;
        }
    }

    /// Requests received so far, as `(method, path)` pairs.
    pub async fn received(&self) -> Vec<(String, String)> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|request| (request.method.as_str().to_string(), request.url.path().to_string()))
            .collect()
    }
}

/// A localhost port with nothing listening on it.
pub fn unused_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    listener
        .local_addr()
        .expect("ephemeral port has an address")
        .port()
}

/// Probe configuration pointing at a port nothing listens on.
pub fn unreachable_config() -> Config {
    Config::default()
        .with_host("127.0.0.1")
        .expect("host is not empty")
        .with_port(unused_port())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_config_points_at_mock() {
        let es = MockElasticsearch::start().await;
        assert_eq!(es.config().base_url(), es.uri());
    }

    #[tokio::test]
    async fn test_root_answers_connection_check() {
        let es = MockElasticsearch::start().await;

        let response = reqwest::get(format!("{}/", es.uri())).await.unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(
            es.received().await,
            vec![("GET".to_string(), "/".to_string())]
        );
    }

    #[test]
    fn test_unreachable_config_uses_loopback() {
        let config = unreachable_config();
        assert_eq!(config.host, "127.0.0.1");
        assert_ne!(config.port, 0);
    }
}
