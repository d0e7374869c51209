//! HTTP management API client.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use crate::broker::{NodeRecord, QueueRecord};
use crate::config::{ManagementConfig, TimeoutConfig};
use crate::management::{ManagementApi, ManagementError, ManagementResult};

const QUEUES_PATH: &str = "api/queues";
const NODES_PATH: &str = "api/nodes";

/// Management API client backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpManagementClient {
    client: Client,
    config: ManagementConfig,
    request_timeout: Duration,
}

impl HttpManagementClient {
    /// Create a new client.
    pub fn new(config: ManagementConfig, timeouts: &TimeoutConfig) -> Result<Self, reqwest::Error> {
        let request_timeout = Duration::from_millis(timeouts.request_ms);
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(timeouts.connect_ms))
            .timeout(request_timeout)
            .no_proxy()
            .build()?;

        Ok(Self {
            client,
            config,
            request_timeout,
        })
    }

    /// Build the URL of an API endpoint on `host`.
    ///
    /// `host` may carry its own port; otherwise the configured port is used.
    pub fn endpoint(&self, host: &str, path: &str) -> ManagementResult<Url> {
        let invalid = |reason: String| ManagementError::InvalidUrl {
            host: host.to_string(),
            reason,
        };

        let mut url = Url::parse(&format!("{}://{}/", self.config.scheme, host.trim()))
            .map_err(|e| invalid(e.to_string()))?;
        if url.host_str().map_or(true, str::is_empty) {
            return Err(invalid("missing host".to_string()));
        }
        if url.port().is_none() {
            url.set_port(Some(self.config.port))
                .map_err(|_| invalid("cannot set port".to_string()))?;
        }
        url.join(path).map_err(|e| invalid(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, host: &str, path: &str) -> ManagementResult<T> {
        let url = self.endpoint(host, path)?;
        let url_str = url.to_string();

        tracing::debug!(host = %host, url = %url_str, "Querying management API");

        let response = self
            .client
            .get(url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .send()
            .await
            .map_err(|e| self.transport_error(&url_str, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ManagementError::Status {
                url: url_str,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(&url_str, e))?;

        serde_json::from_slice(&body).map_err(|source| ManagementError::Malformed {
            url: url_str,
            source,
        })
    }

    fn transport_error(&self, url: &str, error: reqwest::Error) -> ManagementError {
        if error.is_timeout() {
            tracing::debug!(url = %url, timeout_ms = self.request_timeout.as_millis() as u64, "Management API timeout");
            ManagementError::Timeout { url: url.to_string() }
        } else {
            ManagementError::Transport {
                url: url.to_string(),
                source: error,
            }
        }
    }
}

#[async_trait]
impl ManagementApi for HttpManagementClient {
    async fn list_queues(&self, host: &str) -> ManagementResult<Vec<QueueRecord>> {
        self.get_json(host, QUEUES_PATH).await
    }

    async fn list_nodes(&self, host: &str) -> ManagementResult<Vec<NodeRecord>> {
        self.get_json(host, NODES_PATH).await
    }
}
