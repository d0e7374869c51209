//! Broker selection engine.
//!
//! # Data Flow
//! ```text
//! configured hosts + queue records + node records + connection type
//!     → no node data:      random configured host  (random.rs)
//!     → nodes, no queues:  random live hostname    (random.rs)
//!     → nodes and queues:  fewest matching queues  (least_queues.rs)
//!     → Selection { host, tier, live_hosts }
//! ```
//!
//! # Design Decisions
//! - Selection is a pure function; persisting `live_hosts` is the caller's job
//! - Randomness is injected so fallback tiers are testable
//! - The least-queues tier is deterministic: ties go to the first listed node

pub mod least_queues;
pub mod random;

use crate::broker::{canonical_hostname, dedup_preserving_order, ConnectionType, NodeRecord, QueueRecord};
use random::RandomSource;

pub use random::{SeededRandom, ThreadRandom};

/// Which rule produced a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionTier {
    /// No node data, picked a configured host at random.
    Configured,
    /// Live nodes but no queue data, picked a live node at random.
    LiveNode,
    /// Picked the live node carrying the fewest matching queues.
    LeastQueues,
}

impl SelectionTier {
    pub fn as_str(self) -> &'static str {
        match self {
            SelectionTier::Configured => "configured",
            SelectionTier::LiveNode => "live_node",
            SelectionTier::LeastQueues => "least_queues",
        }
    }
}

/// Result of one selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Hostname to connect to.
    pub host: String,
    /// Rule that picked `host`.
    pub tier: SelectionTier,
    /// Distinct hostnames of all live nodes, empty when no node data was given.
    pub live_hosts: Vec<String>,
}

/// Select the least loaded broker host.
///
/// Returns `None` only when there is no node data and `configured` is empty.
pub fn select(
    configured: &[String],
    queues: &[QueueRecord],
    nodes: &[NodeRecord],
    kind: ConnectionType,
    rng: &dyn RandomSource,
) -> Option<Selection> {
    if nodes.is_empty() {
        let host = random::choose(rng, configured)?;
        return Some(Selection {
            host: host.clone(),
            tier: SelectionTier::Configured,
            live_hosts: Vec::new(),
        });
    }

    let live_hosts = dedup_preserving_order(nodes.iter().map(NodeRecord::hostname));

    if queues.is_empty() {
        let host = random::choose(rng, &live_hosts)?.clone();
        return Some(Selection {
            host,
            tier: SelectionTier::LiveNode,
            live_hosts,
        });
    }

    let node = least_queues::least_loaded(queues, nodes, kind)?;
    Some(Selection {
        host: canonical_hostname(&node).to_string(),
        tier: SelectionTier::LeastQueues,
        live_hosts,
    })
}
