//! Documentation detector (skeleton) — public exported functions with no
//! attached doc-style decorator/annotation.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;
use crate::parsers::types::Visibility;

pub struct DocumentationDetector;

impl Detector for DocumentationDetector {
    fn id(&self) -> &str { "documentation-base" }
    fn category(&self) -> DetectorCategory { DetectorCategory::Documentation }
    fn variant(&self) -> DetectorVariant { DetectorVariant::Base }

    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        let exported: std::collections::HashSet<&str> =
            ctx.exports.iter().map(|e| e.name.as_str()).collect();
        for func in ctx.functions {
            let is_public_surface =
                exported.contains(func.name.as_str()) || func.visibility == Visibility::Public;
            if is_public_surface && func.decorators.is_empty() && !func.is_test {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: func.line,
                    column: 0,
                    pattern_id: "DOC-MISSING-001".to_string(),
                    confidence: 0.30,
                    cwe_ids: SmallVec::new(),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Documentation,
                    matched_text: format!("public {}() has no attached documentation annotation", func.name),
                });
            }
        }
        matches
    }
}
