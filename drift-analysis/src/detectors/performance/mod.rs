//! Performance detector (skeleton) — blocking synchronous I/O calls.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

pub struct PerformanceDetector;

const BLOCKING_CALLEES: &[&str] = &["readFileSync", "writeFileSync", "execSync", "sleep", "Thread.sleep"];

impl Detector for PerformanceDetector {
    fn id(&self) -> &str { "performance-base" }
    fn category(&self) -> DetectorCategory { DetectorCategory::Performance }
    fn variant(&self) -> DetectorVariant { DetectorVariant::Base }

    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        for call in ctx.call_sites {
            if BLOCKING_CALLEES.contains(&call.callee_name.as_str()) && func_is_async(ctx, call.caller_function.as_deref()) {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: call.line,
                    column: call.column,
                    pattern_id: "PERF-BLOCKING-001".to_string(),
                    confidence: 0.50,
                    cwe_ids: SmallVec::new(),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Performance,
                    matched_text: format!("blocking {}() inside an async function", call.callee_name),
                });
            }
        }
        matches
    }
}

fn func_is_async(ctx: &DetectionContext, name: Option<&str>) -> bool {
    match name {
        Some(n) => ctx.functions.iter().any(|f| f.name == n && f.is_async),
        None => false,
    }
}
