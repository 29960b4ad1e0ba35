//! CallGraphBuilder — parallel extraction via rayon, builds petgraph StableGraph.

use std::time::Instant;

use drift_core::errors::CallGraphError;
use drift_core::types::collections::FxHashMap;
use rayon::prelude::*;
use xxhash_rust::xxh3::xxh3_64;

use crate::parsers::types::{CallSite, FunctionInfo, ParseResult};

use super::di_support;
use super::resolution::{resolve_call, ResolutionDiagnostics};
use super::types::{CallEdge, CallGraph, CallGraphStats, FunctionNode};

/// Builder for constructing a call graph from parse results.
pub struct CallGraphBuilder {
    /// Maximum number of functions before switching to CTE fallback.
    pub in_memory_threshold: usize,
}

impl CallGraphBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            in_memory_threshold: 500_000,
        }
    }

    /// Create a builder with a custom in-memory threshold.
    pub fn with_threshold(threshold: usize) -> Self {
        Self {
            in_memory_threshold: threshold,
        }
    }

    /// Build a call graph from a set of parse results.
    ///
    /// Phase 1: Extract all functions into nodes (parallel via rayon).
    /// Phase 2: Resolve all call sites into edges (parallel per file).
    pub fn build(&self, parse_results: &[ParseResult]) -> Result<(CallGraph, CallGraphStats), CallGraphError> {
        let start = Instant::now();
        let mut graph = CallGraph::new();

        // Phase 1: add all function nodes. A method appears in `pr.functions`
        // with `class_name: Some(_)`; free functions carry `class_name: None`.
        // Both become one node each, keyed by the same `file::node_name`
        // scheme the indices below use.
        let all_nodes: Vec<FunctionNode> = parse_results
            .par_iter()
            .flat_map_iter(|pr| {
                let module_name = module_name_from_file(&pr.file);
                pr.functions.iter().map(move |f| {
                    let node_name = node_name(f);
                    let qualified_name = Some(match &f.class_name {
                        Some(class) => format!("{class}.{}", f.name),
                        None => format!("{module_name}.{}", f.name),
                    });
                    let is_exported = pr.exports.iter().any(|e| e.name == f.name);
                    FunctionNode {
                        file: pr.file.clone(),
                        name: node_name,
                        qualified_name,
                        language: pr.language.name().to_string(),
                        line: f.line,
                        end_line: f.end_line,
                        is_entry_point: false, // detected later
                        is_exported,
                        signature_hash: signature_hash(f),
                        body_hash: body_hash(f, pr),
                    }
                })
            })
            .collect();

        for node in all_nodes {
            graph.add_function(node);
        }

        // Build lookup indices for resolution
        let mut name_index: FxHashMap<String, Vec<String>> = FxHashMap::default();
        let mut qualified_index: FxHashMap<String, String> = FxHashMap::default();
        let mut export_index: FxHashMap<String, Vec<String>> = FxHashMap::default();
        let mut language_index: FxHashMap<String, String> = FxHashMap::default();

        for pr in parse_results {
            let lang = pr.language.name().to_string();
            let module_name = module_name_from_file(&pr.file);
            let is_exported = |name: &str| pr.exports.iter().any(|e| e.name == name);
            for func in &pr.functions {
                let node_name = node_name(func);
                let key = format!("{}::{}", pr.file, node_name);
                name_index.entry(func.name.clone()).or_default().push(key.clone());
                language_index.insert(key.clone(), lang.clone());

                // Qualified: Class.method or module.function
                let qn = match &func.class_name {
                    Some(class) => format!("{class}.{}", func.name),
                    None => format!("{module_name}.{}", func.name),
                };
                qualified_index.entry(qn).or_insert_with(|| key.clone());

                if is_exported(&func.name) {
                    export_index.entry(func.name.clone()).or_default().push(key);
                }
            }
        }

        // CG-RES-05: Detect DI frameworks for DI resolution
        let detected_frameworks = di_support::detect_di_frameworks(parse_results);

        // Phase 2: Resolve call sites into edges
        // Collect all (caller_key, call_site, file) tuples
        let call_entries: Vec<(String, &CallSite, &ParseResult)> = parse_results
            .iter()
            .flat_map(|pr| {
                pr.functions.iter().flat_map(move |func| {
                    let caller_key = format!("{}::{}", pr.file, node_name(func));
                    pr.call_sites
                        .iter()
                        .filter(move |cs| {
                            cs.line >= func.line && cs.line <= func.end_line
                        })
                        .map(move |cs| (caller_key.clone(), cs, pr))
                })
            })
            .collect();

        let mut resolution_counts: FxHashMap<String, usize> = FxHashMap::default();
        let mut diagnostics = ResolutionDiagnostics::new();
        let mut resolved = 0usize;

        for (caller_key, call_site, pr) in &call_entries {
            let caller_language = pr.language.name();
            if let Some(caller_idx) = graph.get_node(caller_key) {
                // Try standard resolution chain first
                let resolution_result = resolve_call(
                    call_site,
                    &pr.file,
                    caller_language,
                    &pr.imports,
                    &name_index,
                    &qualified_index,
                    &export_index,
                    &language_index,
                );

                // CG-RES-05: If standard resolution fails, try DI resolution
                let resolution_result = resolution_result.or_else(|| {
                    if !detected_frameworks.is_empty() {
                        // Check if the callee name matches a DI-injected type
                        di_support::resolve_di_injection(
                            &call_site.callee_name,
                            &name_index,
                        )
                    } else {
                        None
                    }
                });

                // CG-RES-12: Record diagnostics
                diagnostics.record(
                    resolution_result.as_ref().map(|(_, r)| r),
                    caller_language,
                );

                if let Some((callee_key, resolution)) = resolution_result {
                    if let Some(callee_idx) = graph.get_node(&callee_key) {
                        let edge = CallEdge {
                            resolution,
                            confidence: resolution.default_confidence(),
                            call_site_line: call_site.line,
                        };
                        graph.add_edge(caller_idx, callee_idx, edge);
                        *resolution_counts.entry(resolution.name().to_string()).or_default() += 1;
                        resolved += 1;
                    }
                }
            }
        }

        // CG-RES-12: Emit warnings for low resolution rates
        for warning in diagnostics.low_resolution_warnings() {
            tracing::warn!("{}", warning);
        }

        // Detect entry points
        super::traversal::mark_entry_points(&mut graph, parse_results);

        let total_calls = call_entries.len();
        let stats = CallGraphStats {
            total_functions: graph.function_count(),
            total_edges: graph.edge_count(),
            entry_points: graph.graph.node_indices()
                .filter(|&idx| graph.graph[idx].is_entry_point)
                .count(),
            resolution_counts,
            resolution_rate: if total_calls > 0 {
                resolved as f64 / total_calls as f64
            } else {
                0.0
            },
            build_duration: start.elapsed(),
            cycles_detected: 0,
            diagnostics,
        };

        Ok((graph, stats))
    }
}

impl Default for CallGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The graph-node name for a function: `Class.method` for methods,
/// the bare name for free functions.
pub(crate) fn node_name(f: &FunctionInfo) -> String {
    match &f.class_name {
        Some(class) => format!("{class}.{}", f.name),
        None => f.name.clone(),
    }
}

/// Hash of the function's declared signature: name, parameter types, and
/// return type. Stable across moves within a file; changes whenever the
/// signature itself changes.
pub(crate) fn signature_hash(f: &FunctionInfo) -> u64 {
    let mut buf = f.name.clone();
    for ty in &f.param_types {
        buf.push('\0');
        buf.push_str(ty.as_deref().unwrap_or(""));
    }
    buf.push('\0');
    buf.push_str(f.return_type.as_deref().unwrap_or(""));
    xxh3_64(buf.as_bytes())
}

/// Hash of signature plus body-proxy data (call sites made within the
/// function's line span, and its own line span). We don't retain raw
/// source text in `ParseResult`, so this is the best available proxy for
/// "did the body change" used by incremental rebuilds.
pub(crate) fn body_hash(f: &FunctionInfo, pr: &ParseResult) -> u64 {
    let mut buf = format!("{}:{}", f.line, f.end_line);
    for cs in pr.call_sites.iter().filter(|cs| cs.line >= f.line && cs.line <= f.end_line) {
        buf.push('\0');
        buf.push_str(&cs.callee_name);
        buf.push(':');
        buf.push_str(&cs.argument_count.to_string());
    }
    xxh3_64(buf.as_bytes())
}

/// Extract a module name from a file path.
/// e.g., "src/utils/format.ts" → "format"
/// e.g., "controllers/user.controller.ts" → "user.controller"
fn module_name_from_file(file: &str) -> String {
    let normalized = file.replace('\\', "/");
    let filename = normalized.rsplit('/').next().unwrap_or(&normalized);
    // Strip extension
    for ext in &[".ts", ".tsx", ".js", ".jsx", ".py", ".java", ".go", ".rs", ".rb", ".php", ".cs", ".kt"] {
        if let Some(stripped) = filename.strip_suffix(ext) {
            return stripped.to_string();
        }
    }
    filename.to_string()
}
