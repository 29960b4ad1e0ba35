//! Analysis-pipeline configuration: detection, resolution, call graph,
//! boundary analysis, and graph intelligence knobs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Project-local pattern definitions TOML path, in addition to compiled-in defaults.
    pub pattern_file: Option<String>,
    /// Taint registry TOML path (sources/sinks/sanitizers/propagators).
    pub taint_registry_file: Option<String>,
    /// Fuzzy call-resolution similarity threshold. Default: 0.85.
    pub fuzzy_match_threshold: Option<f64>,
    /// Max BFS depth for reachability queries. Default: 20.
    pub max_reachability_depth: Option<u32>,
    /// Node-count threshold above which call-graph queries fall back to the
    /// recursive-CTE SQL engine instead of in-memory BFS.
    pub call_graph_cte_threshold: Option<usize>,
    /// Max depth for the CTE fallback. Default: 5.
    pub cte_max_depth: Option<u32>,
    /// Enable semantic (resolution-index-aware) detectors. Default: true.
    pub enable_semantic_detectors: Option<bool>,
}

impl AnalysisConfig {
    pub fn effective_fuzzy_match_threshold(&self) -> f64 {
        self.fuzzy_match_threshold.unwrap_or(0.85)
    }

    pub fn effective_max_reachability_depth(&self) -> u32 {
        self.max_reachability_depth.unwrap_or(20)
    }

    pub fn effective_call_graph_cte_threshold(&self) -> usize {
        self.call_graph_cte_threshold.unwrap_or(50_000)
    }

    pub fn effective_cte_max_depth(&self) -> u32 {
        self.cte_max_depth.unwrap_or(5)
    }

    pub fn effective_enable_semantic_detectors(&self) -> bool {
        self.enable_semantic_detectors.unwrap_or(true)
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            pattern_file: other.pattern_file.or(self.pattern_file),
            taint_registry_file: other.taint_registry_file.or(self.taint_registry_file),
            fuzzy_match_threshold: other.fuzzy_match_threshold.or(self.fuzzy_match_threshold),
            max_reachability_depth: other.max_reachability_depth.or(self.max_reachability_depth),
            call_graph_cte_threshold: other
                .call_graph_cte_threshold
                .or(self.call_graph_cte_threshold),
            cte_max_depth: other.cte_max_depth.or(self.cte_max_depth),
            enable_semantic_detectors: other
                .enable_semantic_detectors
                .or(self.enable_semantic_detectors),
        }
    }
}
