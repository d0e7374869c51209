//! Least-loaded broker selection.
//!
//! Picks, among the brokers of a cluster, the host carrying the fewest
//! queues of the relevant durability class, so new publisher and subscriber
//! connections spread evenly across the cluster.
//!
//! # Architecture Overview
//!
//! ```text
//!   caller (hosts, connection type, callbacks)
//!        │
//!        ▼
//!   ┌──────────────┐  load/save   ┌──────────────┐
//!   │  discovery   │─────────────▶│    store     │  remembered hosts
//!   │ orchestrator │              └──────────────┘
//!   └──────┬───────┘
//!          │ per candidate host
//!          ▼
//!   ┌──────────────┐   GET /api/queues, /api/nodes
//!   │  management  │──────────────────────────────▶ broker
//!   └──────┬───────┘
//!          │ first host that answers
//!          ▼
//!   ┌──────────────┐
//!   │load_balancer │  configured → live node → least queues
//!   └──────────────┘
//! ```

// Domain
pub mod broker;
pub mod load_balancer;

// External boundaries
pub mod management;
pub mod store;

// Orchestration
pub mod discovery;

// Cross-cutting concerns
pub mod config;
pub mod observability;

pub use broker::ConnectionType;
pub use config::SelectorConfig;
pub use discovery::{Discovery, DiscoveryError};
pub use load_balancer::{Selection, SelectionTier};

/// Select a broker host for a new connection.
///
/// Builds the HTTP client and file store from `config`, then probes
/// `config.hosts`. Exactly one of `on_success` (selected hostname) or
/// `on_failure` runs.
pub async fn select_host<S, F>(config: &SelectorConfig, kind: ConnectionType, on_success: S, on_failure: F)
where
    S: FnOnce(String),
    F: FnOnce(DiscoveryError),
{
    match Discovery::from_config(config).await {
        Ok(discovery) => {
            discovery
                .select_host(&config.hosts, kind, on_success, on_failure)
                .await
        }
        Err(e) => {
            tracing::error!(error = %e, "Broker discovery could not be initialized");
            on_failure(e)
        }
    }
}
