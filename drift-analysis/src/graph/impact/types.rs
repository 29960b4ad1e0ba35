//! Shared types for impact/blast-radius analysis.

use drift_core::types::collections::FxHashSet;
use petgraph::graph::NodeIndex;

use crate::boundaries::types::SensitiveCategory;

/// Relative severity ordering over sensitivity classes, used to pick the
/// "max sensitivity" a change can reach. Not spec-mandated beyond "max
/// sensitivity"; ranked by the regulatory weight typically attached to
/// each class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SensitivityRank {
    None,
    Pii,
    Credentials,
    Financial,
    Health,
}

impl SensitivityRank {
    pub fn of(category: Option<SensitiveCategory>) -> Self {
        match category {
            None => SensitivityRank::None,
            Some(SensitiveCategory::Pii) => SensitivityRank::Pii,
            Some(SensitiveCategory::Credentials) => SensitivityRank::Credentials,
            Some(SensitiveCategory::Financial) => SensitivityRank::Financial,
            Some(SensitiveCategory::Health) => SensitivityRank::Health,
        }
    }
}

/// Blast radius of a change rooted at one function: every transitive
/// caller and callee, weighted by entry-point exposure and sensitivity.
#[derive(Debug, Clone)]
pub struct ImpactResult {
    pub root: NodeIndex,
    pub affected: FxHashSet<NodeIndex>,
    pub affected_count: usize,
    pub entry_point_ancestors: usize,
    pub sensitivity_max: SensitivityRank,
    /// 0-100.
    pub risk_score: u8,
}

/// A function flagged as dead code: unreachable by any inbound call edge,
/// after false-positive classes are excluded.
#[derive(Debug, Clone)]
pub struct DeadCodeFinding {
    pub node: NodeIndex,
    pub file: String,
    pub name: String,
}
