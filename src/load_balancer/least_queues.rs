//! Least-queues selection across live nodes.

use std::collections::{HashMap, HashSet};
use crate::broker::{ConnectionType, NodeRecord, QueueRecord};

/// Per-node count of queues matching the connection type.
///
/// Entries follow node-record order. Every live node is present, nodes
/// without matching queues carry a count of zero. Queues placed on nodes
/// missing from `nodes` are not counted.
pub fn queue_counts(
    queues: &[QueueRecord],
    nodes: &[NodeRecord],
    kind: ConnectionType,
) -> Vec<(String, usize)> {
    let mut per_node: HashMap<&str, usize> = HashMap::new();
    for queue in queues.iter().filter(|q| kind.counts(q.durable)) {
        *per_node.entry(queue.node.as_str()).or_default() += 1;
    }

    let mut seen: HashSet<&str> = HashSet::with_capacity(nodes.len());
    let mut counts: Vec<(String, usize)> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if !seen.insert(node.name.as_str()) {
            continue;
        }
        let count = per_node.get(node.name.as_str()).copied().unwrap_or(0);
        counts.push((node.name.clone(), count));
    }
    counts
}

/// Node name with the fewest matching queues.
///
/// Ties go to the node listed first by the management API.
pub fn least_loaded(
    queues: &[QueueRecord],
    nodes: &[NodeRecord],
    kind: ConnectionType,
) -> Option<String> {
    let mut counts = queue_counts(queues, nodes, kind);
    // sort_by_key is stable, keeping encounter order on ties
    counts.sort_by_key(|(_, count)| *count);
    counts.into_iter().next().map(|(name, _)| name)
}
