//! Contracts detector (skeleton) — exported functions missing a declared
//! return type in languages that support one.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;
use crate::scanner::language_detect::Language;

pub struct ContractsDetector;

impl Detector for ContractsDetector {
    fn id(&self) -> &str { "contracts-base" }
    fn category(&self) -> DetectorCategory { DetectorCategory::Contracts }
    fn variant(&self) -> DetectorVariant { DetectorVariant::Base }

    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        if !matches!(
            ctx.language,
            Language::TypeScript | Language::Java | Language::CSharp | Language::Go | Language::Rust | Language::Kotlin
        ) {
            return matches;
        }
        let exported: std::collections::HashSet<&str> =
            ctx.exports.iter().map(|e| e.name.as_str()).collect();
        for func in ctx.functions {
            if exported.contains(func.name.as_str()) && func.return_type.is_none() {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: func.line,
                    column: 0,
                    pattern_id: "CONTRACT-NORETTYPE-001".to_string(),
                    confidence: 0.40,
                    cwe_ids: SmallVec::new(),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Contracts,
                    matched_text: format!("exported {}() has no declared return type", func.name),
                });
            }
        }
        matches
    }
}
