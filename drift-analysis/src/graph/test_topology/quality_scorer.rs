//! Coverage quality scoring and minimal test-set selection for a change set.

use drift_core::types::collections::FxHashSet;
use petgraph::graph::NodeIndex;

use super::types::CoverageMapping;

/// Overall coverage quality: the fraction of source functions reached by
/// at least one test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageQuality {
    pub covered_functions: usize,
    pub total_functions: usize,
    pub coverage_ratio: f64,
}

pub fn score_coverage(mapping: &CoverageMapping) -> CoverageQuality {
    let covered_functions = mapping.source_to_test.values().filter(|tests| !tests.is_empty()).count();
    let total_functions = mapping.total_source_functions;
    let coverage_ratio = if total_functions > 0 {
        covered_functions as f64 / total_functions as f64
    } else {
        0.0
    };
    CoverageQuality { covered_functions, total_functions, coverage_ratio }
}

/// The minimum set of tests needed to cover every function in `changed`:
/// the union of tests whose reachable set intersects `changed`, ordered by
/// selectivity (fewest functions reached first) so narrow, targeted tests
/// run before broad ones.
pub fn minimal_test_set(mapping: &CoverageMapping, changed: &FxHashSet<NodeIndex>) -> Vec<NodeIndex> {
    let mut relevant: Vec<(NodeIndex, usize)> = mapping
        .test_to_source
        .iter()
        .filter(|(_, covered)| covered.iter().any(|f| changed.contains(f)))
        .map(|(&test, covered)| (test, covered.len()))
        .collect();

    relevant.sort_by_key(|&(_, count)| count);
    relevant.into_iter().map(|(test, _)| test).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call_graph::types::{CallEdge, CallGraph, FunctionNode, Resolution};
    use crate::graph::test_topology::coverage::compute_coverage;

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
    fn scores_full_coverage_when_every_function_has_a_test() {
        let mut graph = CallGraph::new();
        let t = graph.add_function(node("a_test.rs", "test_helper"));
        let f = graph.add_function(node("lib.rs", "helper"));
        graph.add_edge(t, f, edge());
        let mapping = compute_coverage(&graph);

        let quality = score_coverage(&mapping);
        assert_eq!(quality.coverage_ratio, 1.0);
    }

    #[test]
    fn minimal_test_set_prefers_the_narrower_test_first() {
        let mut graph = CallGraph::new();
        let narrow_test = graph.add_function(node("a_test.rs", "test_narrow"));
        let broad_test = graph.add_function(node("a_test.rs", "test_broad"));
        let target = graph.add_function(node("lib.rs", "target"));
        let other = graph.add_function(node("lib.rs", "other"));

        graph.add_edge(narrow_test, target, edge());
        graph.add_edge(broad_test, target, edge());
        graph.add_edge(broad_test, other, edge());

        let mapping = compute_coverage(&graph);
        let changed = FxHashSet::from_iter([target]);
        let ordered = minimal_test_set(&mapping, &changed);

        assert_eq!(ordered.first(), Some(&narrow_test));
    }
}
