//! Dead-code detection: functions with no inbound call edge, after
//! excluding the well-known classes of function that legitimately have
//! none — entry points, framework hooks, and the like.

use petgraph::graph::NodeIndex;
use petgraph::Direction;

use crate::call_graph::types::CallGraph;

use super::types::DeadCodeFinding;

/// Why a zero-inbound-edge function was excluded from the dead-code list.
/// Ten classes in total (§4.15).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeadCodeExclusion {
    /// Already flagged an entry point by the call-graph builder.
    EntryPoint,
    /// Exported from its module — callable from outside the analyzed set.
    Exported,
    /// Go's capital-letter export convention, not always caught by
    /// `is_exported` when the exporting file wasn't itself scanned.
    GoExportedCapitalization,
    /// Named like a test function; test runners call these by discovery,
    /// not by an ordinary call site.
    TestFunction,
    /// Named like a framework lifecycle hook (constructor, render,
    /// setup/teardown) — invoked by the framework, not application code.
    FrameworkLifecycleHook,
    /// A dunder/magic method, invoked by the language runtime via
    /// operator or protocol dispatch rather than a direct call site.
    MagicMethod,
    /// A conventional process entry point name (main, bootstrap, run).
    MainOrBootstrap,
    /// A common polymorphic-dispatch protocol method (Visitor's
    /// `accept`/`visit`, event-dispatch's `handle`/`dispatch`/`invoke`),
    /// reached through an interface or function-pointer reference the flat
    /// call graph has no edge for.
    DynamicDispatch,
    /// A getter/setter/`is_`-prefixed accessor, the shape reflection-based
    /// serializers and ORMs invoke by field name rather than a call site
    /// (mirrors the field-access style `boundaries::extractors` already
    /// assumes for ORM-mapped classes).
    AccessorMethod,
    /// Has inbound call edges, but every one of them originates in a test
    /// file — distinct from `TestFunction`, which looks at this function's
    /// own name. A helper only ever invoked from test bodies is not dead
    /// production code, but it is also not a verified production caller.
    TestOnlyCaller,
}

fn is_test_file(file: &str) -> bool {
    let lower = file.to_lowercase();
    lower.contains("/test/")
        || lower.contains("/tests/")
        || lower.contains("/spec/")
        || lower.contains("__tests__")
        || lower.ends_with("_test.rs")
        || lower.ends_with(".test.ts")
        || lower.ends_with(".test.js")
        || lower.ends_with(".test.tsx")
        || lower.ends_with(".spec.ts")
        || lower.ends_with(".spec.js")
}

fn is_test_name(name_lower: &str) -> bool {
    name_lower.starts_with("test_") || name_lower.starts_with("test") || name_lower.starts_with("it_")
}

fn exclusion_for(graph: &CallGraph, idx: NodeIndex) -> Option<DeadCodeExclusion> {
    let node = &graph.graph[idx];

    if node.is_entry_point {
        return Some(DeadCodeExclusion::EntryPoint);
    }
    if node.is_exported {
        return Some(DeadCodeExclusion::Exported);
    }
    if node.language == "go" && node.name.chars().next().is_some_and(|c| c.is_uppercase()) {
        return Some(DeadCodeExclusion::GoExportedCapitalization);
    }

    let name_lower = node.name.to_lowercase();
    if is_test_name(&name_lower) {
        return Some(DeadCodeExclusion::TestFunction);
    }
    if matches!(
        name_lower.as_str(),
        "constructor" | "render" | "setup" | "teardown" | "componentdidmount" | "componentwillunmount" | "ngoninit"
    ) {
        return Some(DeadCodeExclusion::FrameworkLifecycleHook);
    }
    if node.name.starts_with("__") || node.name.starts_with("op_") {
        return Some(DeadCodeExclusion::MagicMethod);
    }
    if matches!(name_lower.as_str(), "main" | "bootstrap" | "run" | "start") {
        return Some(DeadCodeExclusion::MainOrBootstrap);
    }
    if matches!(name_lower.as_str(), "accept" | "visit" | "execute" | "handle" | "dispatch" | "invoke") {
        return Some(DeadCodeExclusion::DynamicDispatch);
    }
    if name_lower.starts_with("get_") || name_lower.starts_with("set_") || name_lower.starts_with("is_") {
        return Some(DeadCodeExclusion::AccessorMethod);
    }

    None
}

/// Find functions with no genuine production inbound call edge, excluding
/// the ten recognized false-positive classes.
pub fn find_dead_code(graph: &CallGraph) -> Vec<DeadCodeFinding> {
    let mut findings = Vec::new();

    for idx in graph.graph.node_indices() {
        let callers: Vec<_> = graph.graph.neighbors_directed(idx, Direction::Incoming).collect();
        if !callers.is_empty() {
            let only_test_callers = callers.iter().all(|&c| is_test_file(&graph.graph[c].file));
            if !only_test_callers {
                continue;
            }
            // TestOnlyCaller: every inbound edge is from a test file. A
            // false positive for "dead" — filtered out, same as the other
            // nine classes below — rather than reported.
            continue;
        }
        if exclusion_for(graph, idx).is_some() {
            continue;
        }
        let node = &graph.graph[idx];
        findings.push(DeadCodeFinding { node: idx, file: node.file.clone(), name: node.name.clone() });
    }

    findings
}
