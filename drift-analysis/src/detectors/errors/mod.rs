//! Errors detector — swallowed exceptions and abrupt aborts, from the
//! per-function `error_handling` classification `parsers::languages::common`
//! already computes during parse.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;
use crate::parsers::types::ErrorHandlingKind;

pub struct ErrorsDetector;

impl Detector for ErrorsDetector {
    fn id(&self) -> &str { "errors-base" }
    fn category(&self) -> DetectorCategory { DetectorCategory::Errors }
    fn variant(&self) -> DetectorVariant { DetectorVariant::Base }
    fn is_critical(&self) -> bool { true }

    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch> {
        let mut matches = Vec::new();

        for func in ctx.functions {
            for kind in &func.error_handling {
                match kind {
                    ErrorHandlingKind::Swallowed => {
                        matches.push(PatternMatch {
                            file: ctx.file.to_string(),
                            line: func.line,
                            column: 0,
                            pattern_id: "ERR-SWALLOW-001".to_string(),
                            confidence: 0.80,
                            cwe_ids: SmallVec::from_buf([391, 0]),
                            owasp: None,
                            detection_method: DetectionMethod::AstVisitor,
                            category: PatternCategory::Errors,
                            matched_text: format!("{}() swallows an exception with an empty catch", func.name),
                        });
                    }
                    ErrorHandlingKind::Abort => {
                        matches.push(PatternMatch {
                            file: ctx.file.to_string(),
                            line: func.line,
                            column: 0,
                            pattern_id: "ERR-ABORT-001".to_string(),
                            confidence: 0.55,
                            cwe_ids: SmallVec::new(),
                            owasp: None,
                            detection_method: DetectionMethod::AstVisitor,
                            category: PatternCategory::Errors,
                            matched_text: format!("{}() aborts the process/request on error", func.name),
                        });
                    }
                    ErrorHandlingKind::Rethrow | ErrorHandlingKind::LogAndContinue | ErrorHandlingKind::ConvertToResult => {}
                }
            }
        }

        matches
    }
}
