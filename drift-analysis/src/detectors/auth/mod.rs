//! Auth detector (skeleton) — decorators/calls that explicitly skip auth.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

pub struct AuthDetector;

const BYPASS_MARKERS: &[&str] = &["AllowAnonymous", "SkipAuthorization", "PermitAll", "public_action", "skip_before_action"];

impl Detector for AuthDetector {
    fn id(&self) -> &str { "auth-base" }
    fn category(&self) -> DetectorCategory { DetectorCategory::Auth }
    fn variant(&self) -> DetectorVariant { DetectorVariant::Base }
    fn is_critical(&self) -> bool { true }

    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        for func in ctx.functions {
            for dec in &func.decorators {
                if BYPASS_MARKERS.contains(&dec.name.as_str()) {
                    matches.push(PatternMatch {
                        file: ctx.file.to_string(),
                        line: dec.line,
                        column: 0,
                        pattern_id: "AUTH-BYPASS-001".to_string(),
                        confidence: 0.60,
                        cwe_ids: SmallVec::from_buf([862, 0]),
                        owasp: Some("A01:2021".to_string()),
                        detection_method: DetectionMethod::AstVisitor,
                        category: PatternCategory::Auth,
                        matched_text: format!("{}() explicitly bypasses auth via @{}", func.name, dec.name),
                    });
                }
            }
        }
        matches
    }
}
