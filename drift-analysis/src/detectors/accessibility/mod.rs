//! Accessibility detector (skeleton) — image elements constructed with no
//! arguments, a proxy for a missing `alt` prop.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

pub struct AccessibilityDetector;

impl Detector for AccessibilityDetector {
    fn id(&self) -> &str { "accessibility-base" }
    fn category(&self) -> DetectorCategory { DetectorCategory::Accessibility }
    fn variant(&self) -> DetectorVariant { DetectorVariant::Base }

    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        for call in ctx.call_sites {
            if matches!(call.callee_name.as_str(), "img" | "Image") && call.argument_count == 0 {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: call.line,
                    column: call.column,
                    pattern_id: "A11Y-NOALT-001".to_string(),
                    confidence: 0.35,
                    cwe_ids: SmallVec::new(),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Accessibility,
                    matched_text: format!("{} with no props — verify alt text is set", call.callee_name),
                });
            }
        }
        matches
    }
}
