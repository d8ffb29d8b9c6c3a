//! Elasticsearch monitoring API client.
//!
//! A thin wrapper over `reqwest` that exposes the three monitoring endpoints
//! the probe reads. Responses are returned as raw JSON documents; field
//! extraction belongs to the handlers.

use crate::config::Config;
use crate::errors::MetricsError;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// Metric group filter for `GET /_nodes/_local/stats/<group>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatsGroup {
    Jvm,
    Indices,
}

impl NodeStatsGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeStatsGroup::Jvm => "jvm",
            NodeStatsGroup::Indices => "indices",
        }
    }
}

/// Connection to a single Elasticsearch HTTP endpoint.
#[derive(Debug, Clone)]
pub struct EsClient {
    base_url: String,
    http_client: Client,
}

impl EsClient {
    /// Build the HTTP client and verify the endpoint answers `GET /`.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::ConnectionFailed` if the client cannot be built,
    /// the endpoint is unreachable, or it answers with a non-2xx status.
    pub async fn connect(config: &Config) -> Result<Self, MetricsError> {
        let client = Self::new(config)?;
        client.ping().await?;
        Ok(client)
    }

    /// Build the client without contacting the endpoint.
    pub fn new(config: &Config) -> Result<Self, MetricsError> {
        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| {
                warn!(target: "es.client", error = %e, "Failed to build HTTP client");
                MetricsError::ConnectionFailed(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            base_url: config.base_url(),
            http_client,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check that the endpoint is up.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn ping(&self) -> Result<(), MetricsError> {
        let url = format!("{}/", self.base_url);

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            warn!(target: "es.client", error = %e, "Elasticsearch is unreachable");
            MetricsError::ConnectionFailed(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(target: "es.client", status = %status, "Elasticsearch rejected connection check");
            return Err(MetricsError::ConnectionFailed(format!(
                "GET / returned status {status}"
            )));
        }

        debug!(target: "es.client", "Connection check passed");
        Ok(())
    }

    /// `GET /_cluster/health`
    pub async fn cluster_health(&self) -> Result<Value, MetricsError> {
        self.get_json("/_cluster/health").await
    }

    /// `GET /_cluster/stats`
    pub async fn cluster_stats(&self) -> Result<Value, MetricsError> {
        self.get_json("/_cluster/stats").await
    }

    /// `GET /_nodes/_local/stats/<group>`
    pub async fn local_node_stats(&self, group: NodeStatsGroup) -> Result<Value, MetricsError> {
        self.get_json(&format!("/_nodes/_local/stats/{}", group.as_str()))
            .await
    }

    #[instrument(skip(self))]
    async fn get_json(&self, endpoint: &str) -> Result<Value, MetricsError> {
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            warn!(target: "es.client", error = %e, "Request failed");
            MetricsError::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(target: "es.client", status = %status, "Elasticsearch returned error status");
            return Err(MetricsError::RequestFailed {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.json::<Value>().await.map_err(|e| {
            warn!(target: "es.client", error = %e, "Failed to parse response body");
            MetricsError::InvalidResponse {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            }
        })?;

        debug!(target: "es.client", "Response received");
        Ok(body)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(server: &MockServer) -> Config {
        Config::default()
            .with_host(&server.address().ip().to_string())
            .unwrap()
            .with_port(server.address().port())
    }

    #[test]
    fn test_node_stats_group_paths() {
        assert_eq!(NodeStatsGroup::Jvm.as_str(), "jvm");
        assert_eq!(NodeStatsGroup::Indices.as_str(), "indices");
    }

    #[test]
    fn test_base_url_from_config() {
        let client = EsClient::new(&Config::default()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9200");
    }

    #[tokio::test]
    async fn test_connect_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "cluster_name": "test"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = EsClient::connect(&test_config(&mock_server)).await;
        assert!(result.is_ok(), "connect should succeed: {result:?}");
    }

    #[tokio::test]
    async fn test_connect_rejected_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let result = EsClient::connect(&test_config(&mock_server)).await;
        assert!(matches!(result, Err(MetricsError::ConnectionFailed(_))));
    }

    #[tokio::test]
    async fn test_local_node_stats_path() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/_nodes/_local/stats/indices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"nodes": {}})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = EsClient::new(&test_config(&mock_server)).unwrap();
        let body = client
            .local_node_stats(NodeStatsGroup::Indices)
            .await
            .unwrap();
        assert_eq!(body, json!({"nodes": {}}));
    }

    #[tokio::test]
    async fn test_error_status_maps_to_request_failed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/_cluster/stats"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = EsClient::new(&test_config(&mock_server)).unwrap();
        let result = client.cluster_stats().await;
        assert!(matches!(
            result,
            Err(MetricsError::RequestFailed { ref endpoint, status: 500 }) if endpoint == "/_cluster/stats"
        ));
    }

    #[tokio::test]
    async fn test_non_json_body_is_invalid_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/_cluster/health"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = EsClient::new(&test_config(&mock_server)).unwrap();
        let result = client.cluster_health().await;
        assert!(matches!(result, Err(MetricsError::InvalidResponse { .. })));
    }
}
