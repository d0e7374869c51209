//! Node, queue and connection type definitions.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which side of the broker a new connection will serve.
///
/// Decides which queue durability class counts toward a node's load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    /// Producers declare transient queues.
    Publisher,
    /// Consumers rely on durable queues.
    Subscriber,
}

impl ConnectionType {
    /// Return true if a queue with the given durability counts as load.
    pub fn counts(self, durable: bool) -> bool {
        match self {
            ConnectionType::Publisher => !durable,
            ConnectionType::Subscriber => durable,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionType::Publisher => "publisher",
            ConnectionType::Subscriber => "subscriber",
        }
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown connection type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown connection type '{0}', expected 'publisher' or 'subscriber'")]
pub struct ParseConnectionTypeError(pub String);

impl FromStr for ConnectionType {
    type Err = ParseConnectionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "publisher" => Ok(ConnectionType::Publisher),
            "subscriber" => Ok(ConnectionType::Subscriber),
            _ => Err(ParseConnectionTypeError(s.to_string())),
        }
    }
}

/// One live cluster member as reported by `/api/nodes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Full node identity, `<clusterTag>@<hostname>`.
    pub name: String,
}

impl NodeRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Hostname part of the node name.
    pub fn hostname(&self) -> &str {
        canonical_hostname(&self.name)
    }
}

/// One queue as reported by `/api/queues`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueRecord {
    /// Name of the node hosting the queue (matches `NodeRecord::name`).
    pub node: String,

    /// Whether the queue survives a broker restart.
    #[serde(default)]
    pub durable: bool,
}

impl QueueRecord {
    pub fn new(node: impl Into<String>, durable: bool) -> Self {
        Self {
            node: node.into(),
            durable,
        }
    }
}

/// Strip the cluster tag from a node name.
///
/// `"rabbit@mq-1"` becomes `"mq-1"`. A name without `@` is returned as is.
pub fn canonical_hostname(name: &str) -> &str {
    match name.split_once('@') {
        Some((_, host)) => host,
        None => name,
    }
}

/// Remove duplicates, keeping the first occurrence of each item.
pub fn dedup_preserving_order<I, T>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for item in items {
        let item = item.into();
        if seen.insert(item.clone()) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_hostname() {
        assert_eq!(canonical_hostname("rabbit@mq-1"), "mq-1");
        assert_eq!(canonical_hostname("rabbit@10.0.0.7"), "10.0.0.7");
        assert_eq!(canonical_hostname("bare-host"), "bare-host");
    }

    #[test]
    fn test_durability_filter() {
        assert!(ConnectionType::Publisher.counts(false));
        assert!(!ConnectionType::Publisher.counts(true));
        assert!(ConnectionType::Subscriber.counts(true));
        assert!(!ConnectionType::Subscriber.counts(false));
    }

    #[test]
    fn test_parse_connection_type() {
        assert_eq!("publisher".parse::<ConnectionType>(), Ok(ConnectionType::Publisher));
        assert_eq!(" Subscriber ".parse::<ConnectionType>(), Ok(ConnectionType::Subscriber));
        assert!("consumer".parse::<ConnectionType>().is_err());
        assert_eq!(ConnectionType::Subscriber.to_string(), "subscriber");
    }

    #[test]
    fn test_records_ignore_extra_fields() {
        let body = r#"[{"name":"queue-1","node":"rabbit@a","durable":true,"messages":12},
                       {"name":"queue-2","node":"rabbit@b"}]"#;
        let queues: Vec<QueueRecord> = serde_json::from_str(body).unwrap();
        assert_eq!(queues, vec![QueueRecord::new("rabbit@a", true), QueueRecord::new("rabbit@b", false)]);

        let nodes: Vec<NodeRecord> =
            serde_json::from_str(r#"[{"name":"rabbit@a","running":true,"uptime":1000}]"#).unwrap();
        assert_eq!(nodes[0].hostname(), "a");
    }

    #[test]
    fn test_missing_node_field_is_malformed() {
        let result: Result<Vec<QueueRecord>, _> = serde_json::from_str(r#"[{"durable":true}]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_dedup_preserving_order() {
        let merged = dedup_preserving_order(["b", "a", "b", "c", "a"]);
        assert_eq!(merged, vec!["b", "a", "c"]);
    }
}
