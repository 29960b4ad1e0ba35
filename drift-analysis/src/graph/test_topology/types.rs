//! Shared types for test-to-source coverage mapping.

use drift_core::types::collections::{FxHashMap, FxHashSet};
use petgraph::graph::NodeIndex;

/// The result of mapping test functions to the production functions they
/// exercise, derived by tracing outgoing call-graph edges from each test.
#[derive(Debug, Default, Clone)]
pub struct CoverageMapping {
    pub total_test_functions: usize,
    pub total_source_functions: usize,
    pub source_to_test: FxHashMap<NodeIndex, FxHashSet<NodeIndex>>,
    pub test_to_source: FxHashMap<NodeIndex, FxHashSet<NodeIndex>>,
}
