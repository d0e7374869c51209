//! Broker cluster domain model.
//!
//! # Data Flow
//! ```text
//! management API JSON
//!     → types.rs (NodeRecord / QueueRecord)
//!     → canonical_hostname() strips the cluster tag ("rabbit@host" → "host")
//!     → load_balancer consumes records, returns a bare hostname
//! ```
//!
//! # Design Decisions
//! - Records keep only the fields selection needs; unknown fields are ignored
//! - Hostnames are plain strings, no resolution happens here

pub mod types;

pub use types::{canonical_hostname, dedup_preserving_order, ConnectionType, NodeRecord, QueueRecord};
