//! Intraprocedural taint tracking: follows taint through a single
//! function's call sites using source order as a proxy for dataflow,
//! since the parser doesn't retain enough of the expression tree to
//! bind a sink's arguments back to a specific source precisely.

use crate::parsers::types::{CallSite, FunctionInfo, ParseResult};

use super::propagation::PropagationContext;
use super::registry::{classify_propagator, classify_sanitizer, classify_sink, classify_source};
use super::registry_loader::ArgFlowTarget;
use super::types::{TaintFlow, TaintHop, TaintSink, TaintSource};

/// Track taint flows within a single function's call sites.
pub fn track_function(pr: &ParseResult, func: &FunctionInfo) -> Vec<TaintFlow> {
    let func_key = crate::call_graph::builder::node_name(func);

    let mut sites: Vec<&CallSite> = pr
        .call_sites
        .iter()
        .filter(|c| c.caller_function.as_deref() == Some(func_key.as_str()))
        .filter(|c| c.line >= func.line && c.line <= func.end_line)
        .collect();
    sites.sort_by_key(|c| c.line);

    let mut ctx = PropagationContext::new();
    let mut last_tainted_var: Option<String> = None;
    let mut flows = Vec::new();

    for site in sites {
        if let Some(source_type) = classify_source(site.receiver.as_deref(), &site.callee_name) {
            let var = format!("call@{}", site.line);
            ctx.taint_variable(&var, source_type);
            last_tainted_var = Some(var);
            continue;
        }

        if let Some(sanitizer_type) = classify_sanitizer(&site.callee_name) {
            if let Some(target) = last_tainted_var.clone() {
                ctx.sanitize(&target, sanitizer_type, sanitizer_type.neutralizes());
            }
            continue;
        }

        if let Some(rule) = classify_propagator(site.receiver.as_deref(), &site.callee_name) {
            if rule.from_arg == 0 && rule.to == ArgFlowTarget::Return {
                if let Some(source_var) = last_tainted_var.clone() {
                    let var = format!("call@{}", site.line);
                    ctx.propagate(&source_var, &var);
                    last_tainted_var = Some(var);
                }
            }
            continue;
        }

        if let Some(sink_type) = classify_sink(site.receiver.as_deref(), &site.callee_name) {
            let Some(source_var) = last_tainted_var.clone() else { continue };
            let Some(label) = ctx.get_label(&source_var).cloned() else { continue };

            let source_line = source_var
                .strip_prefix("call@")
                .and_then(|s| s.parse().ok())
                .unwrap_or(func.line);

            flows.push(TaintFlow {
                source: TaintSource {
                    file: pr.file.clone(),
                    line: source_line,
                    column: 0,
                    expression: source_var.clone(),
                    source_type: label.source_type,
                },
                sink: TaintSink {
                    file: pr.file.clone(),
                    line: site.line,
                    column: site.column,
                    expression: site.callee_name.clone(),
                    sink_type,
                },
                path: vec![TaintHop {
                    file: pr.file.clone(),
                    line: func.line,
                    column: 0,
                    description: format!("within {func_key}"),
                }],
                is_sanitized: label.is_safe_for(sink_type),
                cwe_id: Some(sink_type.default_cwe()),
            });
        }
    }

    flows
}

/// Track taint flows across every function in a parsed file.
pub fn track_file(pr: &ParseResult) -> Vec<TaintFlow> {
    pr.functions.iter().flat_map(|f| track_function(pr, f)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::types::{FunctionInfo, Range, Visibility};
    use crate::scanner::language_detect::Language;
    use smallvec::smallvec;

    fn func() -> FunctionInfo {
        FunctionInfo {
            name: "handler".to_string(),
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
            end_line: 10,
            range: Range { start_byte: 0, end_byte: 100, start_line: 1, end_line: 10 },
        }
    }

    fn call(line: u32, receiver: Option<&str>, callee: &str) -> CallSite {
        CallSite {
            callee_name: callee.to_string(),
            receiver: receiver.map(|s| s.to_string()),
            caller_function: Some("handler".to_string()),
            argument_count: 1,
            line,
            column: 0,
        }
    }

    fn pr(call_sites: Vec<CallSite>) -> ParseResult {
        ParseResult {
            file: "app.rs".to_string(),
            language: Language::Rust,
            functions: vec![func()],
            classes: vec![],
            imports: vec![],
            exports: vec![],
            call_sites,
            string_literals: vec![],
            error_ranges: vec![],
            parse_time_us: 0,
        }
    }

    #[test]
    fn flags_request_body_reaching_sql_query_as_unsanitized() {
        let result = pr(vec![
            call(2, Some("req"), "body"),
            call(4, Some("userRepo"), "query"),
        ]);
        let flows = track_function(&result, &result.functions[0]);
        assert_eq!(flows.len(), 1);
        assert!(!flows[0].is_sanitized);
        assert_eq!(flows[0].cwe_id, Some(89));
    }

    #[test]
    fn sanitizer_between_source_and_sink_marks_flow_safe() {
        let result = pr(vec![
            call(2, Some("req"), "body"),
            call(3, None, "escapeSql"),
            call(4, Some("userRepo"), "query"),
        ]);
        let flows = track_function(&result, &result.functions[0]);
        assert_eq!(flows.len(), 1);
        assert!(flows[0].is_sanitized);
    }

    #[test]
    fn sink_with_no_preceding_source_produces_no_flow() {
        let result = pr(vec![call(2, Some("userRepo"), "query")]);
        assert!(track_function(&result, &result.functions[0]).is_empty());
    }
}
