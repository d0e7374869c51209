//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! discovery / selection / store
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters via the metrics facade)
//!
//! Consumers:
//!     → whatever subscriber / recorder the embedding application installs
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Metrics are cheap (no-ops without a recorder)

pub mod logging;
pub mod metrics;
