//! Broker discovery subsystem.
//!
//! # Data Flow
//! ```text
//! select_host(configured, type, on_success, on_failure)
//!     → HostStore::load() remembered hosts
//!     → candidates = dedup(remembered ++ configured)
//!     → per candidate: list_queues → list_nodes   (sequential, or raced
//!       with the winner claiming the one-shot gate in gate.rs)
//!     → first success: load_balancer::select()
//!         → HostStore::save(live hosts)
//!         → on_success(host)
//!     → all failed: on_failure(AllHostsExhausted)
//! ```
//!
//! # Design Decisions
//! - The first reachable host's view of the cluster is trusted; views are not merged
//! - A failing host only drops out of this round, no retries or backoff here
//! - Failure is reported only after every candidate was tried
//! - Callbacks are `FnOnce`; racing probes go through `SuccessGate`, so only one
//!   host's view is ever selected from and persisted

pub mod gate;
pub mod orchestrator;

use thiserror::Error;
use crate::management::ManagementError;
use crate::store::StoreError;

pub use gate::SuccessGate;
pub use orchestrator::Discovery;

/// Errors surfaced by a discovery.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// No configured hosts were supplied.
    #[error("no broker hosts configured")]
    NoHosts,

    /// Every candidate host failed.
    #[error("all {attempted} broker hosts failed")]
    AllHostsExhausted {
        attempted: usize,
        #[source]
        last: Option<ManagementError>,
    },

    /// The HTTP client could not be built.
    #[error("failed to build management client: {0}")]
    Client(#[source] reqwest::Error),

    /// The host store could not be opened.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for discovery operations.
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;
