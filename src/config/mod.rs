//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → schema.rs env overlay (management credentials)
//!     → validation.rs (semantic checks)
//!     → SelectorConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Credentials may come from the environment so they stay out of files

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::SelectorConfig;
pub use schema::{DiscoveryConfig, ManagementConfig, ObservabilityConfig, ProbeStrategy, StoreConfig, TimeoutConfig};
