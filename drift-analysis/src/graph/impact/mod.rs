//! Impact analysis: blast radius, dead-code detection, and path finding
//! between two functions in the call graph.

pub mod blast_radius;
pub mod dead_code;
pub mod types;

use std::collections::VecDeque;

use drift_core::types::collections::FxHashMap;
use petgraph::graph::NodeIndex;
use petgraph::Direction;

use crate::call_graph::types::CallGraph;

pub use blast_radius::blast_radius;
pub use dead_code::{find_dead_code, DeadCodeExclusion};
pub use types::{DeadCodeFinding, ImpactResult, SensitivityRank};

/// Find a path from `from` to `to` following outgoing call edges, as a
/// plain BFS shortest path — the same traversal reachability itself uses,
/// just with predecessors retained to reconstruct the route.
pub fn find_path(graph: &CallGraph, from: NodeIndex, to: NodeIndex) -> Option<Vec<NodeIndex>> {
    if from == to {
        return Some(vec![from]);
    }

    let mut predecessors: FxHashMap<NodeIndex, NodeIndex> = FxHashMap::default();
    let mut visited = drift_core::types::collections::FxHashSet::default();
    let mut queue = VecDeque::new();

    visited.insert(from);
    queue.push_back(from);

    while let Some(node) = queue.pop_front() {
        for neighbor in graph.graph.neighbors_directed(node, Direction::Outgoing) {
            if visited.insert(neighbor) {
                predecessors.insert(neighbor, node);
                if neighbor == to {
                    return Some(reconstruct(&predecessors, from, to));
                }
                queue.push_back(neighbor);
            }
        }
    }

    None
}

fn reconstruct(predecessors: &FxHashMap<NodeIndex, NodeIndex>, from: NodeIndex, to: NodeIndex) -> Vec<NodeIndex> {
    let mut path = vec![to];
    let mut current = to;
    while current != from {
        current = predecessors[&current];
        path.push(current);
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call_graph::types::{CallEdge, FunctionNode, Resolution};

    fn node(file: &str, name: &str) -> FunctionNode {
        FunctionNode {
            file: file.to_string(),
            name: name.to_string(),
            qualified_name: None,
            language: "rust".to_string(),
            line: 1,
            end_line: 2,
            is_entry_point: false,
            is_exported: false,
            signature_hash: 0,
            body_hash: 0,
        }
    }

    fn edge() -> CallEdge {
        CallEdge { resolution: Resolution::SameFile, confidence: 0.95, call_site_line: 1 }
    }

    #[test]
    fn finds_a_path_through_an_intermediate_function() {
        let mut graph = CallGraph::new();
        let a = graph.add_function(node("a.rs", "a"));
        let b = graph.add_function(node("a.rs", "b"));
        let c = graph.add_function(node("a.rs", "c"));
        graph.add_edge(a, b, edge());
        graph.add_edge(b, c, edge());

        assert_eq!(find_path(&graph, a, c), Some(vec![a, b, c]));
    }

    #[test]
    fn returns_none_when_unreachable() {
        let mut graph = CallGraph::new();
        let a = graph.add_function(node("a.rs", "a"));
        let b = graph.add_function(node("a.rs", "b"));

        assert_eq!(find_path(&graph, a, b), None);
    }
}
