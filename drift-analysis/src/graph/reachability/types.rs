//! Shared types for reachability analysis: direction, result, and the
//! node set a traversal settles on.

use drift_core::types::collections::FxHashSet;
use petgraph::graph::NodeIndex;

/// Which edge direction a traversal follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalDirection {
    /// Follow outgoing edges — "what can `source` reach".
    Forward,
    /// Follow incoming edges — "what can reach `source`".
    Inverse,
}

/// The result of a reachability traversal from a single source node.
#[derive(Debug, Clone)]
pub struct ReachabilityResult {
    pub source: NodeIndex,
    pub reachable: FxHashSet<NodeIndex>,
    pub direction: TraversalDirection,
}
