//! Logging detector (skeleton) — ad hoc console/print logging instead of a
//! structured logger call.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

pub struct LoggingDetector;

const AD_HOC_CALLEES: &[&str] = &["print", "println", "puts", "echo", "var_dump", "printStackTrace"];

impl Detector for LoggingDetector {
    fn id(&self) -> &str { "logging-base" }
    fn category(&self) -> DetectorCategory { DetectorCategory::Logging }
    fn variant(&self) -> DetectorVariant { DetectorVariant::Base }

    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        for call in ctx.call_sites {
            let is_console_log = call.receiver.as_deref() == Some("console") && call.callee_name == "log";
            if AD_HOC_CALLEES.contains(&call.callee_name.as_str()) || is_console_log {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: call.line,
                    column: call.column,
                    pattern_id: "LOG-ADHOC-001".to_string(),
                    confidence: 0.45,
                    cwe_ids: SmallVec::new(),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Logging,
                    matched_text: format!("{}() — ad hoc logging, not the structured logger", call.callee_name),
                });
            }
        }
        matches
    }
}
