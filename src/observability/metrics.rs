//! Selection metrics.
//!
//! # Metrics
//! - `broker_selector_probes_total` (counter): host probes by outcome
//! - `broker_selector_selections_total` (counter): selections by tier, connection type
//! - `broker_selector_discovery_failures_total` (counter): discoveries where every host failed
//! - `broker_selector_store_errors_total` (counter): host store failures by operation
//!
//! # Design Decisions
//! - Uses the `metrics` facade; the embedding application installs a recorder
//! - Labels have bounded cardinality (outcome, tier, connection type, operation)
//! - No exporter here, the selector opens no listener

use metrics::counter;

use crate::broker::ConnectionType;
use crate::load_balancer::SelectionTier;

const PROBES_TOTAL: &str = "broker_selector_probes_total";
const SELECTIONS_TOTAL: &str = "broker_selector_selections_total";
const DISCOVERY_FAILURES_TOTAL: &str = "broker_selector_discovery_failures_total";
const STORE_ERRORS_TOTAL: &str = "broker_selector_store_errors_total";

/// Record the outcome of probing one host.
///
/// Hosts are not a label; candidate lists are unbounded. Per-host detail
/// goes to the logs.
pub fn record_probe(success: bool) {
    let outcome = if success { "success" } else { "failure" };
    counter!(PROBES_TOTAL, "outcome" => outcome).increment(1);
}

/// Record a completed selection.
pub fn record_selection(tier: SelectionTier, kind: ConnectionType) {
    counter!(SELECTIONS_TOTAL, "tier" => tier.as_str(), "connection_type" => kind.as_str()).increment(1);
}

/// Record a discovery that exhausted all hosts.
pub fn record_discovery_failure() {
    counter!(DISCOVERY_FAILURES_TOTAL).increment(1);
}

/// Record a host store failure.
pub fn record_store_error(operation: &'static str) {
    counter!(STORE_ERRORS_TOTAL, "operation" => operation).increment(1);
}
