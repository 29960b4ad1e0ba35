//! Detects functions that actually handle an error rather than merely
//! catching and discarding or aborting on it.

use crate::parsers::types::{ErrorHandlingKind, ParseResult};

use super::types::ErrorHandler;

/// Functions whose `error_handling` entries convert, rethrow, or log the
/// error — i.e. the error is accounted for, not just caught and dropped.
pub fn detect_handlers(parse_results: &[ParseResult]) -> Vec<ErrorHandler> {
    let mut handlers = Vec::new();

    for pr in parse_results {
        for f in &pr.functions {
            for kind in &f.error_handling {
                if matches!(
                    kind,
                    ErrorHandlingKind::ConvertToResult
                        | ErrorHandlingKind::Rethrow
                        | ErrorHandlingKind::LogAndContinue
                ) {
                    handlers.push(ErrorHandler {
                        file: pr.file.clone(),
                        function: crate::call_graph::builder::node_name(f),
                        line: f.line,
                        kind: *kind,
                    });
                }
            }
        }
    }

    handlers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::types::{FunctionInfo, Range, Visibility};
    use crate::scanner::language_detect::Language;
    use smallvec::smallvec;

    fn pr_with_handling(kinds: Vec<ErrorHandlingKind>) -> ParseResult {
        ParseResult {
            file: "a.rs".to_string(),
            language: Language::Rust,
            functions: vec![FunctionInfo {
                name: "save".to_string(),
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
                error_handling: kinds,
                line: 10,
                end_line: 20,
                range: Range { start_byte: 0, end_byte: 10, start_line: 10, end_line: 20 },
            }],
            classes: vec![],
            imports: vec![],
            exports: vec![],
            call_sites: vec![],
            string_literals: vec![],
            error_ranges: vec![],
            parse_time_us: 0,
        }
    }

    #[test]
    fn counts_rethrow_as_a_handler_but_not_swallowed() {
        let handlers = detect_handlers(&[pr_with_handling(vec![ErrorHandlingKind::Rethrow])]);
        assert_eq!(handlers.len(), 1);
        assert_eq!(handlers[0].function, "save");

        let none = detect_handlers(&[pr_with_handling(vec![ErrorHandlingKind::Swallowed])]);
        assert!(none.is_empty());
    }
}
