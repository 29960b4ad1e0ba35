//! Core call-graph data types: the petgraph wrapper, node/edge payloads,
//! resolution confidence tiers, and build statistics.

use std::time::Duration;

use drift_core::types::collections::FxHashMap;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::Direction;

use super::resolution::ResolutionDiagnostics;

/// A function or method, as a node in the call graph.
#[derive(Debug, Clone)]
pub struct FunctionNode {
    pub file: String,
    pub name: String,
    /// `module.function` or `Class.method`, used for cross-file resolution.
    pub qualified_name: Option<String>,
    pub language: String,
    pub line: u32,
    pub end_line: u32,
    pub is_entry_point: bool,
    pub is_exported: bool,
    /// xxhash of the function's declared signature (name, params, return type).
    pub signature_hash: u64,
    /// xxhash of the function's declared signature plus body-proxy data
    /// (call sites, line span) — used by `incremental` to detect edits
    /// that change behavior without changing the signature.
    pub body_hash: u64,
}

/// How a call site was resolved to a callee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Caller and callee live in the same file.
    SameFile,
    /// Resolved via a receiver-qualified method call (`self.foo()`, `obj.bar()`).
    MethodCall,
    /// Resolved via constructor-injected dependency (NestJS/Spring/FastAPI/etc).
    DiInjection,
    /// Resolved by following an import statement to its source module.
    ImportBased,
    /// Resolved because exactly one exported symbol in the codebase matches.
    ExportBased,
    /// Resolved by a name match with no other corroborating signal.
    Fuzzy,
}

impl Resolution {
    /// Default confidence for this resolution tier, absent any other signal.
    pub fn default_confidence(&self) -> f32 {
        match self {
            Resolution::SameFile => 0.95,
            Resolution::MethodCall => 0.90,
            Resolution::DiInjection => 0.80,
            Resolution::ImportBased => 0.75,
            Resolution::ExportBased => 0.60,
            Resolution::Fuzzy => 0.40,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Resolution::SameFile => "same_file",
            Resolution::MethodCall => "method_call",
            Resolution::DiInjection => "di_injection",
            Resolution::ImportBased => "import_based",
            Resolution::ExportBased => "export_based",
            Resolution::Fuzzy => "fuzzy",
        }
    }
}

/// An edge from a caller to a callee.
#[derive(Debug, Clone)]
pub struct CallEdge {
    pub resolution: Resolution,
    pub confidence: f32,
    pub call_site_line: u32,
}

/// The call graph: a directed `petgraph` graph of functions and calls,
/// plus a `file::name` index for O(1) lookup by key.
pub struct CallGraph {
    pub graph: StableGraph<FunctionNode, CallEdge>,
    index: FxHashMap<String, NodeIndex>,
}

impl CallGraph {
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            index: FxHashMap::default(),
        }
    }

    /// Add a function node, keyed by `file::name`. Re-adding the same key
    /// replaces the prior node (last parse result wins).
    pub fn add_function(&mut self, node: FunctionNode) -> NodeIndex {
        let key = format!("{}::{}", node.file, node.name);
        let idx = self.graph.add_node(node);
        self.index.insert(key, idx);
        idx
    }

    /// Look up a node by its `file::name` key.
    pub fn get_node(&self, key: &str) -> Option<NodeIndex> {
        self.index.get(key).copied()
    }

    pub fn add_edge(&mut self, caller: NodeIndex, callee: NodeIndex, edge: CallEdge) {
        self.graph.add_edge(caller, callee, edge);
    }

    pub fn function_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn neighbors(&self, idx: NodeIndex, direction: Direction) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_directed(idx, direction)
    }
}

impl Default for CallGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary statistics produced alongside a built call graph.
pub struct CallGraphStats {
    pub total_functions: usize,
    pub total_edges: usize,
    pub entry_points: usize,
    pub resolution_counts: FxHashMap<String, usize>,
    pub resolution_rate: f64,
    pub build_duration: Duration,
    pub cycles_detected: usize,
    pub diagnostics: ResolutionDiagnostics,
}
