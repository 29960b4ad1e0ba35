//! Structural detector — class/function naming convention consistency
//! within a single file.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

pub struct StructuralDetector;

fn is_pascal_case(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_uppercase()) && !name.contains('_')
}

fn is_snake_case(name: &str) -> bool {
    name.chars().all(|c| c.is_lowercase() || c.is_ascii_digit() || c == '_')
}

fn is_camel_case(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_lowercase()) && !name.contains('_')
}

impl Detector for StructuralDetector {
    fn id(&self) -> &str { "structural-base" }
    fn category(&self) -> DetectorCategory { DetectorCategory::Structural }
    fn variant(&self) -> DetectorVariant { DetectorVariant::Base }

    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch> {
        let mut matches = Vec::new();

        for class in ctx.classes {
            if !is_pascal_case(&class.name) {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: class.line,
                    column: 0,
                    pattern_id: "STRUCT-NAMING-001".to_string(),
                    confidence: 0.50,
                    cwe_ids: SmallVec::new(),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Structural,
                    matched_text: format!("class {} does not follow PascalCase", class.name),
                });
            }
        }

        // Majority-vote convention across this file's free functions, flag
        // the minority that disagrees with it.
        let free_fns: Vec<_> = ctx.functions.iter().filter(|f| f.class_name.is_none()).collect();
        if free_fns.len() >= 3 {
            let snake_count = free_fns.iter().filter(|f| is_snake_case(&f.name)).count();
            let camel_count = free_fns.iter().filter(|f| is_camel_case(&f.name)).count();
            let majority_is_snake = snake_count >= camel_count;
            for func in &free_fns {
                let matches_majority = if majority_is_snake {
                    is_snake_case(&func.name)
                } else {
                    is_camel_case(&func.name)
                };
                if !matches_majority && (is_snake_case(&func.name) || is_camel_case(&func.name)) {
                    matches.push(PatternMatch {
                        file: ctx.file.to_string(),
                        line: func.line,
                        column: 0,
                        pattern_id: "STRUCT-NAMING-002".to_string(),
                        confidence: 0.45,
                        cwe_ids: SmallVec::new(),
                        owasp: None,
                        detection_method: DetectionMethod::AstVisitor,
                        category: PatternCategory::Structural,
                        matched_text: format!(
                            "{}() breaks this file's dominant naming convention",
                            func.name
                        ),
                    });
                }
            }
        }

        matches
    }
}
