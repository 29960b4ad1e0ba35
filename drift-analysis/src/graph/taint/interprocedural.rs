//! Interprocedural taint tracking: extends intraprocedural flows across
//! call graph edges, covering data that's tainted in one function and
//! only reaches a sink once passed into a callee.

use drift_core::types::collections::FxHashMap;

use crate::call_graph::types::CallGraph;
use crate::parsers::types::{CallSite, FunctionInfo, ParseResult};

use super::registry::{classify_sink, classify_source};
use super::types::{TaintFlow, TaintHop, TaintSink, TaintSource};

/// Find flows whose source and sink live in different functions, connected
/// by a direct call edge: the caller taints a value it never itself
/// consumes, and the callee consumes a value it never itself produces.
pub fn track_across_call_graph(graph: &CallGraph, parse_results: &[ParseResult]) -> Vec<TaintFlow> {
    let index = index_functions(parse_results);
    let mut flows = Vec::new();

    for edge_idx in graph.graph.edge_indices() {
        let Some((caller_idx, callee_idx)) = graph.graph.edge_endpoints(edge_idx) else { continue };
        let caller_node = &graph.graph[caller_idx];
        let callee_node = &graph.graph[callee_idx];

        let caller_key = format!("{}::{}", caller_node.file, caller_node.name);
        let callee_key = format!("{}::{}", callee_node.file, callee_node.name);

        let (Some(&(cpr, cf)), Some(&(epr, ef))) = (index.get(&caller_key), index.get(&callee_key)) else {
            continue;
        };
        let caller_pr = &parse_results[cpr];
        let caller_func = &caller_pr.functions[cf];
        let callee_pr = &parse_results[epr];
        let callee_func = &callee_pr.functions[ef];

        let sources = open_sources(caller_pr, caller_func);
        if sources.is_empty() {
            continue;
        }
        let sinks = open_sinks(callee_pr, callee_func);
        if sinks.is_empty() {
            continue;
        }

        for source in &sources {
            for sink in &sinks {
                flows.push(TaintFlow {
                    source: source.clone(),
                    sink: sink.clone(),
                    path: vec![TaintHop {
                        file: caller_pr.file.clone(),
                        line: caller_func.line,
                        column: 0,
                        description: format!("{} calls {}", caller_node.name, callee_node.name),
                    }],
                    is_sanitized: false,
                    cwe_id: Some(sink.sink_type.default_cwe()),
                });
            }
        }
    }

    flows
}

/// `file::node_name` key to `(parse_result_index, function_index)`, mirroring
/// the key scheme `CallGraph` itself uses.
fn index_functions(parse_results: &[ParseResult]) -> FxHashMap<String, (usize, usize)> {
    let mut index = FxHashMap::default();
    for (pi, pr) in parse_results.iter().enumerate() {
        for (fi, f) in pr.functions.iter().enumerate() {
            let key = format!("{}::{}", pr.file, crate::call_graph::builder::node_name(f));
            index.insert(key, (pi, fi));
        }
    }
    index
}

fn sites_in_function<'a>(pr: &'a ParseResult, func: &FunctionInfo) -> Vec<&'a CallSite> {
    let func_key = crate::call_graph::builder::node_name(func);
    let mut sites: Vec<&CallSite> = pr
        .call_sites
        .iter()
        .filter(|c| c.caller_function.as_deref() == Some(func_key.as_str()))
        .filter(|c| c.line >= func.line && c.line <= func.end_line)
        .collect();
    sites.sort_by_key(|c| c.line);
    sites
}

/// Source calls in `func` with no sink anywhere after them in the same
/// function — taint that escapes unconsumed, a candidate for crossing
/// into a callee.
fn open_sources(pr: &ParseResult, func: &FunctionInfo) -> Vec<TaintSource> {
    let sites = sites_in_function(pr, func);
    let mut out = Vec::new();

    for (i, site) in sites.iter().enumerate() {
        let Some(source_type) = classify_source(site.receiver.as_deref(), &site.callee_name) else {
            continue;
        };
        let consumed_locally = sites[i + 1..]
            .iter()
            .any(|later| classify_sink(later.receiver.as_deref(), &later.callee_name).is_some());
        if consumed_locally {
            continue;
        }
        out.push(TaintSource {
            file: pr.file.clone(),
            line: site.line,
            column: site.column,
            expression: site.callee_name.clone(),
            source_type,
        });
    }

    out
}

/// Sink calls in `func` with no source anywhere before them in the same
/// function — a sink fed by data from outside the function, a candidate
/// for crossing from a caller.
fn open_sinks(pr: &ParseResult, func: &FunctionInfo) -> Vec<TaintSink> {
    let sites = sites_in_function(pr, func);
    let mut out = Vec::new();

    for (i, site) in sites.iter().enumerate() {
        let Some(sink_type) = classify_sink(site.receiver.as_deref(), &site.callee_name) else {
            continue;
        };
        let fed_locally = sites[..i]
            .iter()
            .any(|earlier| classify_source(earlier.receiver.as_deref(), &earlier.callee_name).is_some());
        if fed_locally {
            continue;
        }
        out.push(TaintSink {
            file: pr.file.clone(),
            line: site.line,
            column: site.column,
            expression: site.callee_name.clone(),
            sink_type,
        });
    }

    out
}
