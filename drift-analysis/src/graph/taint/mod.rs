//! Taint analysis: source/sink/sanitizer classification, intraprocedural
//! tracking within a function, interprocedural tracking across the call
//! graph, and SARIF export of the resulting flows.

pub mod interprocedural;
pub mod intraprocedural;
pub mod propagation;
pub mod registry;
pub mod registry_loader;
pub mod registry_spec;
pub mod sarif;
pub mod types;

use crate::call_graph::types::CallGraph;
use crate::parsers::types::ParseResult;

pub use interprocedural::track_across_call_graph;
pub use intraprocedural::{track_file, track_function};
pub use propagation::{propagate_through_collection, PropagationContext};
pub use registry::{classify_propagator, classify_sanitizer, classify_sink, classify_source};
pub use registry_loader::{ArgFlowTarget, CompiledPropagatorRule, CompiledTaintRegistry};
pub use sarif::generate_sarif;
pub use types::{
    SanitizerType, SinkType, SourceType, TaintFlow, TaintHop, TaintLabel, TaintSanitizer, TaintSink, TaintSource,
};

/// Run the full taint analysis over a codebase: every file's intraprocedural
/// flows plus whatever crosses function boundaries via the call graph.
pub fn analyze(graph: &CallGraph, parse_results: &[ParseResult]) -> Vec<TaintFlow> {
    let mut flows: Vec<TaintFlow> = parse_results.iter().flat_map(track_file).collect();
    flows.extend(track_across_call_graph(graph, parse_results));
    flows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call_graph::builder::CallGraphBuilder;
    use crate::parsers::types::{CallSite, FunctionInfo, Range, Visibility};
    use crate::scanner::language_detect::Language;
    use smallvec::smallvec;

    fn func(name: &str) -> FunctionInfo {
        FunctionInfo {
            name: name.to_string(),
            class_name: None,
            visibility: Visibility::Public,
            is_async: false,
            is_static: false,
            is_constructor: false,
            is_test: false,
            param_names: smallvec![],
            param_types: smallvec![],
            return_type: None,
            decorators: vec![],
            error_handling: vec![],
            line: 1,
            end_line: 5,
            range: Range { start_byte: 0, end_byte: 50, start_line: 1, end_line: 5 },
        }
    }

    fn call(caller: &str, line: u32, receiver: Option<&str>, callee: &str) -> CallSite {
        CallSite {
            callee_name: callee.to_string(),
            receiver: receiver.map(|s| s.to_string()),
            caller_function: Some(caller.to_string()),
            argument_count: 1,
            line,
            column: 0,
        }
    }

    #[test]
    fn analyze_combines_intraprocedural_and_interprocedural_flows() {
        let pr = ParseResult {
            file: "app.rs".to_string(),
            language: Language::Rust,
            functions: vec![func("handle")],
            classes: vec![],
            imports: vec![],
            exports: vec![],
            call_sites: vec![call("handle", 2, Some("req"), "body"), call("handle", 3, Some("userRepo"), "query")],
            string_literals: vec![],
            error_ranges: vec![],
            parse_time_us: 0,
        };
        let parse_results = vec![pr];
        let (graph, _stats) = CallGraphBuilder::new().build(&parse_results).unwrap();

        let flows = analyze(&graph, &parse_results);
        assert_eq!(flows.len(), 1);
        assert!(!flows[0].is_sanitized);
    }
}
