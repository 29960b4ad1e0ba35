//! Test smells derived from the coverage mapping: tests that cover nothing,
//! tests that cover implausibly much, and production functions no test
//! reaches at all.

use petgraph::graph::NodeIndex;

use crate::call_graph::types::CallGraph;

use super::types::CoverageMapping;

/// A god test's reachable-function count above which it's flagged as
/// testing too much to be a meaningful unit of coverage.
pub const GOD_TEST_THRESHOLD: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TestSmellKind {
    /// Classified as a test but reaches zero source functions.
    Vacuous,
    /// Reaches an implausibly large number of source functions.
    God,
    /// A source function no test reaches.
    Untested,
}

#[derive(Debug, Clone)]
pub struct TestSmell {
    pub node: NodeIndex,
    pub file: String,
    pub name: String,
    pub kind: TestSmellKind,
    pub reached_count: usize,
}

/// Find test smells in a coverage mapping.
pub fn find_smells(graph: &CallGraph, mapping: &CoverageMapping) -> Vec<TestSmell> {
    let mut smells = Vec::new();

    for (&test_idx, covered) in &mapping.test_to_source {
        let node = &graph.graph[test_idx];
        if covered.is_empty() {
            smells.push(TestSmell {
                node: test_idx,
                file: node.file.clone(),
                name: node.name.clone(),
                kind: TestSmellKind::Vacuous,
                reached_count: 0,
            });
        } else if covered.len() > GOD_TEST_THRESHOLD {
            smells.push(TestSmell {
                node: test_idx,
                file: node.file.clone(),
                name: node.name.clone(),
                kind: TestSmellKind::God,
                reached_count: covered.len(),
            });
        }
    }

    for idx in graph.graph.node_indices() {
        if mapping.test_to_source.contains_key(&idx) {
            continue;
        }
        let has_test = mapping.source_to_test.get(&idx).is_some_and(|tests| !tests.is_empty());
        if !has_test {
            let node = &graph.graph[idx];
            smells.push(TestSmell {
                node: idx,
                file: node.file.clone(),
                name: node.name.clone(),
                kind: TestSmellKind::Untested,
                reached_count: 0,
            });
        }
    }

    smells
}
