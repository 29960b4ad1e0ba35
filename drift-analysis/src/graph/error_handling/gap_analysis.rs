//! Finds concrete gaps in a codebase's error handling: swallowed catches,
//! process aborts, and propagation chains that never reach a handler.

use crate::parsers::types::{ErrorHandlingKind, ParseResult};

use super::types::{ErrorHandlingGap, GapKind, PropagationChain};

/// Direct per-function gaps (swallowed/abort) plus one gap per propagation
/// chain that traced all the way up without finding a handler.
pub fn find_gaps(parse_results: &[ParseResult], chains: &[PropagationChain]) -> Vec<ErrorHandlingGap> {
    let mut gaps = Vec::new();

    for pr in parse_results {
        for f in &pr.functions {
            for kind in &f.error_handling {
                let gap_kind = match kind {
                    ErrorHandlingKind::Swallowed => Some(GapKind::SwallowedError),
                    ErrorHandlingKind::Abort => Some(GapKind::AbruptAbort),
                    _ => None,
                };
                if let Some(gap_kind) = gap_kind {
                    gaps.push(ErrorHandlingGap {
                        file: pr.file.clone(),
                        function: crate::call_graph::builder::node_name(f),
                        line: f.line,
                        kind: gap_kind,
                    });
                }
            }
        }
    }

    for chain in chains {
        if !chain.is_handled {
            if let Some(origin) = chain.functions.first() {
                gaps.push(ErrorHandlingGap {
                    file: origin.file.clone(),
                    function: origin.function.clone(),
                    line: origin.line,
                    kind: GapKind::UnhandledPropagation,
                });
            }
        }
    }

    gaps
}

/// Ratio of gaps to total error-handling sites across the codebase, in
/// `[0.0, 1.0]`. `0.0` when there are no error-handling sites at all.
pub fn gap_ratio(parse_results: &[ParseResult], gaps: &[ErrorHandlingGap]) -> f64 {
    let total_sites: usize = parse_results
        .iter()
        .flat_map(|pr| pr.functions.iter())
        .map(|f| f.error_handling.len())
        .sum();

    if total_sites == 0 {
        return 0.0;
    }
    gaps.len() as f64 / total_sites as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::error_handling::types::PropagationNode;

    #[test]
    fn unhandled_chain_produces_one_gap_at_its_origin() {
        let chain = PropagationChain {
            functions: vec![PropagationNode {
                file: "a.rs".to_string(),
                function: "save".to_string(),
                line: 5,
                handles_error: false,
                propagates_error: true,
            }],
            error_type: Some("swallowed".to_string()),
            is_handled: false,
        };
        let gaps = find_gaps(&[], &[chain]);
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].kind, GapKind::UnhandledPropagation);
    }

    #[test]
    fn handled_chain_produces_no_gap() {
        let chain = PropagationChain {
            functions: vec![],
            error_type: None,
            is_handled: true,
        };
        assert!(find_gaps(&[], &[chain]).is_empty());
    }
}
