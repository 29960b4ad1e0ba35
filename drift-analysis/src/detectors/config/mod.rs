//! Config detector (skeleton) — plaintext `http://` endpoints in string literals.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

pub struct ConfigDetector;

impl Detector for ConfigDetector {
    fn id(&self) -> &str { "config-base" }
    fn category(&self) -> DetectorCategory { DetectorCategory::Config }
    fn variant(&self) -> DetectorVariant { DetectorVariant::Base }

    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        for (value, line) in &ctx.parse_result.string_literals {
            if value.starts_with("http://") && !value.contains("localhost") && !value.contains("127.0.0.1") {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: *line,
                    column: 0,
                    pattern_id: "CONFIG-PLAINTEXT-001".to_string(),
                    confidence: 0.40,
                    cwe_ids: SmallVec::from_buf([319, 0]),
                    owasp: Some("A02:2021".to_string()),
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Config,
                    matched_text: "plaintext http:// endpoint in config-like string".to_string(),
                });
            }
        }
        matches
    }
}
