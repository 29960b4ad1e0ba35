//! Components detector (skeleton) — UI components with an overly large prop/param surface.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

pub struct ComponentsDetector;

const MAX_PROPS: usize = 8;

impl Detector for ComponentsDetector {
    fn id(&self) -> &str { "components-base" }
    fn category(&self) -> DetectorCategory { DetectorCategory::Components }
    fn variant(&self) -> DetectorVariant { DetectorVariant::Base }

    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        for func in ctx.functions {
            let looks_like_component = func.class_name.is_none()
                && func.name.chars().next().is_some_and(|c| c.is_uppercase());
            if looks_like_component && func.param_names.len() > MAX_PROPS {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: func.line,
                    column: 0,
                    pattern_id: "COMP-PROPS-001".to_string(),
                    confidence: 0.45,
                    cwe_ids: SmallVec::new(),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Components,
                    matched_text: format!(
                        "component {}() takes {} props, consider grouping",
                        func.name,
                        func.param_names.len()
                    ),
                });
            }
        }
        matches
    }
}
