//! Call-graph construction: parses out a directed function/method graph,
//! resolves call sites to callees at decreasing confidence tiers, and
//! detects entry points. Falls back to SQL-backed CTE traversal when the
//! in-memory graph would be too large to build up front.

pub mod builder;
pub mod cte_fallback;
pub mod di_support;
pub mod incremental;
pub mod resolution;
pub mod traversal;
pub mod types;

pub use builder::CallGraphBuilder;
pub use incremental::IncrementalCallGraph;
pub use resolution::{resolve_call, ResolutionDiagnostics};
pub use traversal::{bfs_forward, bfs_inverse, detect_entry_points, mark_entry_points};
pub use types::{CallEdge, CallGraph, CallGraphStats, FunctionNode, Resolution};
