//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the selector.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Environment variables overriding the management API username, first match wins.
pub const USERNAME_ENV: [&str; 2] = ["BROKER_MGMT_USERNAME", "RABBIT_USERNAME"];

/// Environment variables overriding the management API password, first match wins.
pub const PASSWORD_ENV: [&str; 2] = ["BROKER_MGMT_PASSWORD", "RABBIT_PASSWORD"];

/// Root configuration for the broker selector.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SelectorConfig {
    /// Broker hosts to query when nothing is remembered.
    pub hosts: Vec<String>,

    /// Management API access.
    pub management: ManagementConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Remembered-host store settings.
    pub store: StoreConfig,

    /// Host probing settings.
    pub discovery: DiscoveryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl SelectorConfig {
    /// Apply credential overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    /// Apply credential overrides from `lookup` (variable name → value).
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(username) = USERNAME_ENV.iter().find_map(|name| lookup(*name)) {
            self.management.username = username;
        }
        if let Some(password) = PASSWORD_ENV.iter().find_map(|name| lookup(*name)) {
            self.management.password = password;
        }
        self
    }
}

/// Broker management API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ManagementConfig {
    /// URL scheme ("http" or "https").
    pub scheme: String,

    /// Management API port, used when a host entry carries none.
    pub port: u16,

    /// Basic auth username.
    pub username: String,

    /// Basic auth password.
    pub password: String,
}

impl Default for ManagementConfig {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            port: 15672,
            username: "guest".to_string(),
            password: "guest".to_string(),
        }
    }
}

/// Timeout configuration for management API calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in milliseconds.
    pub connect_ms: u64,

    /// Total time for one API request in milliseconds.
    pub request_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_ms: 2_000,
            request_ms: 5_000,
        }
    }
}

/// Remembered-host store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the JSON file holding remembered hosts.
    pub path: String,

    /// Key the host list is stored under.
    pub key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: ".broker-selector/hosts.json".to_string(),
            key: "hosts".to_string(),
        }
    }
}

/// How candidate hosts are probed.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStrategy {
    /// One host at a time, in candidate order.
    #[default]
    Sequential,
    /// All hosts at once, first success wins.
    Concurrent,
}

/// Host probing configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Probe strategy.
    pub strategy: ProbeStrategy,

    /// Seed for the fallback random choice. Unset uses the thread RNG.
    pub seed: Option<u64>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of human-readable ones.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}
