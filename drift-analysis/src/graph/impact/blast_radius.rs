//! Blast radius: transitive callers union transitive callees of a
//! function, weighted by entry-point exposure and sensitivity.

use drift_core::types::collections::{FxHashMap, FxHashSet};
use petgraph::graph::NodeIndex;

use crate::call_graph::traversal::{bfs_forward, bfs_inverse};
use crate::call_graph::types::CallGraph;

use super::types::{ImpactResult, SensitivityRank};

/// Compute the blast radius of a change rooted at `root`.
///
/// `sensitivity` maps a node to the max sensitivity class reached by the
/// fields that function touches — supplied by the caller, which is the
/// one that has joined call-graph nodes against the boundary analyzer's
/// function-to-field map.
pub fn blast_radius(
    graph: &CallGraph,
    root: NodeIndex,
    sensitivity: &FxHashMap<NodeIndex, SensitivityRank>,
) -> ImpactResult {
    let callers: FxHashSet<NodeIndex> = bfs_inverse(graph, root, None).into_iter().collect();
    let callees: FxHashSet<NodeIndex> = bfs_forward(graph, root, None).into_iter().collect();

    let affected: FxHashSet<NodeIndex> = callers.union(&callees).copied().collect();

    let entry_point_ancestors = callers.iter().filter(|&&idx| graph.graph[idx].is_entry_point).count();

    let sensitivity_max = affected
        .iter()
        .chain(std::iter::once(&root))
        .filter_map(|idx| sensitivity.get(idx))
        .copied()
        .max()
        .unwrap_or(SensitivityRank::None);

    let risk_score = compute_risk_score(affected.len(), entry_point_ancestors, sensitivity_max);

    ImpactResult {
        root,
        affected_count: affected.len(),
        affected,
        entry_point_ancestors,
        sensitivity_max,
        risk_score,
    }
}

/// Weighted blend of affected-function count, entry-point exposure, and
/// sensitivity, clamped into `[0, 100]`. Logarithmic on count so a change
/// touching hundreds of functions doesn't simply max out against one
/// touching dozens.
fn compute_risk_score(affected_count: usize, entry_point_ancestors: usize, sensitivity_max: SensitivityRank) -> u8 {
    let size_component = (affected_count as f64 + 1.0).ln() * 8.0;
    let entry_component = (entry_point_ancestors.min(5) as f64) * 8.0;
    let sensitivity_component = sensitivity_max as u8 as f64 * 10.0;

    (size_component + entry_component + sensitivity_component).clamp(0.0, 100.0) as u8
}
