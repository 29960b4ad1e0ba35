//! Testing detector — test functions with no assertion calls in their body.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

pub struct TestingDetector;

const ASSERTION_CALLEES: &[&str] = &[
    "expect", "assert", "assertEqual", "assertTrue", "assertFalse", "assert_eq",
    "assert_ne", "should", "Assert", "AreEqual", "require", "must_equal",
];

impl Detector for TestingDetector {
    fn id(&self) -> &str { "testing-base" }
    fn category(&self) -> DetectorCategory { DetectorCategory::Testing }
    fn variant(&self) -> DetectorVariant { DetectorVariant::Base }

    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch> {
        let mut matches = Vec::new();

        for func in ctx.functions {
            if !func.is_test {
                continue;
            }
            let has_assertion = ctx.call_sites.iter().any(|call| {
                call.caller_function.as_deref() == Some(func.name.as_str())
                    && (ASSERTION_CALLEES.contains(&call.callee_name.as_str())
                        || call.callee_name.starts_with("assert")
                        || call.callee_name.starts_with("expect"))
            });
            if !has_assertion {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: func.line,
                    column: 0,
                    pattern_id: "TEST-NOASSERT-001".to_string(),
                    confidence: 0.60,
                    cwe_ids: SmallVec::new(),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Testing,
                    matched_text: format!("test {}() contains no assertion call", func.name),
                });
            }
        }

        matches
    }
}
