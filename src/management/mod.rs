//! Broker management API access.
//!
//! # Data Flow
//! ```text
//! candidate host ("mq-1" or "mq-1:15673")
//!     → client.rs builds {scheme}://host:port/api/{queues,nodes}
//!     → GET with basic auth, bounded by connect/request timeouts
//!     → JSON body → Vec<QueueRecord> / Vec<NodeRecord>
//! ```
//!
//! # Design Decisions
//! - The API is a trait so discovery can run against fakes
//! - Timeouts, transport errors, non-2xx and bad JSON are all per-host failures
//! - No retries here; discovery moves on to the next host

pub mod client;

use async_trait::async_trait;
use thiserror::Error;
use crate::broker::{NodeRecord, QueueRecord};

pub use client::HttpManagementClient;

/// Errors from one management API call.
#[derive(Debug, Error)]
pub enum ManagementError {
    /// The host entry could not be turned into a URL.
    #[error("invalid management URL for host '{host}': {reason}")]
    InvalidUrl { host: String, reason: String },

    /// Connection or protocol failure.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded the configured timeout.
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// Non-2xx response.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Body was not the expected JSON shape.
    #[error("malformed response from {url}: {source}")]
    Malformed {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for management API calls.
pub type ManagementResult<T> = Result<T, ManagementError>;

/// Read-only view of a broker's management API.
#[async_trait]
pub trait ManagementApi: Send + Sync {
    /// List all queues known to the cluster, queried through `host`.
    async fn list_queues(&self, host: &str) -> ManagementResult<Vec<QueueRecord>>;

    /// List all live cluster nodes, queried through `host`.
    async fn list_nodes(&self, host: &str) -> ManagementResult<Vec<NodeRecord>>;
}
