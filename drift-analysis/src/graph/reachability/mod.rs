//! Reachability analysis built on top of the call graph: plain forward/
//! inverse traversal with an invalidating cache, service-boundary-aware
//! traversal, and field-level flow tracking.

pub mod cache;
pub mod cross_service;
pub mod field_flow;
pub mod types;

use drift_core::types::collections::FxHashSet;
use petgraph::graph::NodeIndex;

use crate::call_graph::types::CallGraph;
use crate::call_graph::traversal::{bfs_forward, bfs_inverse};

pub use cache::ReachabilityCache;
pub use cross_service::{cross_service_reachability, detect_service_boundaries, CrossServiceResult, ServiceBoundary};
pub use field_flow::{track_field_flow, track_multiple_fields, FieldFlowResult, TrackedField};
pub use types::{ReachabilityResult, TraversalDirection};

/// Compute reachability from `source`, consulting and populating `cache`
/// when one is given.
pub fn compute_reachability(
    graph: &CallGraph,
    source: NodeIndex,
    direction: TraversalDirection,
    cache: Option<&ReachabilityCache>,
    max_depth: Option<usize>,
) -> ReachabilityResult {
    if let Some(cache) = cache {
        if let Some(cached) = cache.get(source, direction) {
            return cached;
        }
    }

    let reachable: FxHashSet<NodeIndex> = match direction {
        TraversalDirection::Forward => bfs_forward(graph, source, max_depth),
        TraversalDirection::Inverse => bfs_inverse(graph, source, max_depth),
    }
    .into_iter()
    .collect();

    let result = ReachabilityResult { source, reachable, direction };

    if let Some(cache) = cache {
        cache.put(result.clone(), direction);
    }

    result
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
    fn caches_a_forward_result_and_reuses_it() {
        let mut graph = CallGraph::new();
        let a = graph.add_function(node("a.rs", "a"));
        let b = graph.add_function(node("a.rs", "b"));
        graph.add_edge(a, b, edge());

        let cache = ReachabilityCache::new(16);
        let first = compute_reachability(&graph, a, TraversalDirection::Forward, Some(&cache), None);
        assert!(first.reachable.contains(&b));
        assert_eq!(cache.miss_count(), 1);

        let second = compute_reachability(&graph, a, TraversalDirection::Forward, Some(&cache), None);
        assert_eq!(second.reachable, first.reachable);
        assert_eq!(cache.hit_count(), 1);
    }
}
