//! Types detector (skeleton) — parameters with no declared type in
//! statically-typed languages.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;
use crate::scanner::language_detect::Language;

pub struct TypesDetector;

impl Detector for TypesDetector {
    fn id(&self) -> &str { "types-base" }
    fn category(&self) -> DetectorCategory { DetectorCategory::Types }
    fn variant(&self) -> DetectorVariant { DetectorVariant::Base }

    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        if !matches!(ctx.language, Language::TypeScript) {
            return matches;
        }
        for func in ctx.functions {
            let untyped_params = func.param_types.iter().filter(|t| t.is_none()).count();
            if untyped_params > 0 {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: func.line,
                    column: 0,
                    pattern_id: "TYPES-IMPLICITANY-001".to_string(),
                    confidence: 0.35,
                    cwe_ids: SmallVec::new(),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Types,
                    matched_text: format!(
                        "{}() has {} parameter(s) with no declared type",
                        func.name, untyped_params
                    ),
                });
            }
        }
        matches
    }
}
