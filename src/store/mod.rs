//! Remembered-host store.
//!
//! # Data Flow
//! ```text
//! discovery start
//!     → HostStore::load()  (hosts seen by the last successful discovery)
//!     → merged in front of the configured hosts
//!
//! node data obtained
//!     → HostStore::save()  (full replace, never merged)
//! ```
//!
//! # Design Decisions
//! - Injected as a trait, no process-wide singleton
//! - file.rs persists a JSON object keyed by the configured key
//! - memory.rs backs tests and embedders that need no persistence
//! - Store failures are logged by the caller, never fatal to a discovery

pub mod file;
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

pub use file::FileHostStore;
pub use memory::MemoryHostStore;

/// Errors from the host store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("host store IO error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("host store at {path} is corrupt: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Durable list of previously seen broker hosts.
#[async_trait]
pub trait HostStore: Send + Sync {
    /// Remembered hosts, empty if nothing was stored yet.
    async fn load(&self) -> StoreResult<Vec<String>>;

    /// Replace the remembered hosts.
    async fn save(&self, hosts: &[String]) -> StoreResult<()>;
}
