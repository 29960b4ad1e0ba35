//! API detector (skeleton) — route handlers with no error handling at all.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

pub struct ApiDetector;

const ROUTE_DECORATORS: &[&str] = &["Get", "Post", "Put", "Delete", "Patch", "route", "RequestMapping"];

impl Detector for ApiDetector {
    fn id(&self) -> &str { "api-base" }
    fn category(&self) -> DetectorCategory { DetectorCategory::Api }
    fn variant(&self) -> DetectorVariant { DetectorVariant::Base }

    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        for func in ctx.functions {
            let is_handler = func.decorators.iter().any(|d| ROUTE_DECORATORS.contains(&d.name.as_str()));
            if is_handler && func.error_handling.is_empty() {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: func.line,
                    column: 0,
                    pattern_id: "API-NOERR-001".to_string(),
                    confidence: 0.50,
                    cwe_ids: SmallVec::new(),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Api,
                    matched_text: format!("route handler {}() has no error handling", func.name),
                });
            }
        }
        matches
    }
}
