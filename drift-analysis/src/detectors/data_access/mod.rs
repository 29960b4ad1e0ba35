//! Data-access detector — raw SQL, missing parameterization, N+1-prone ORM calls.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

pub struct DataAccessDetector;

const RAW_QUERY_CALLEES: &[&str] = &[
    "query", "rawQuery", "raw_query", "execute", "exec", "rawQueryAsync",
    "ExecuteReader", "Exec", "QueryRow",
];

impl Detector for DataAccessDetector {
    fn id(&self) -> &str { "data-access-base" }
    fn category(&self) -> DetectorCategory { DetectorCategory::DataAccess }
    fn variant(&self) -> DetectorVariant { DetectorVariant::Base }
    fn is_critical(&self) -> bool { true }

    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch> {
        let mut matches = Vec::new();

        for call in ctx.call_sites {
            if RAW_QUERY_CALLEES.contains(&call.callee_name.as_str()) {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: call.line,
                    column: call.column,
                    pattern_id: "DATA-RAWSQL-001".to_string(),
                    confidence: 0.65,
                    cwe_ids: SmallVec::from_buf([89, 0]),
                    owasp: Some("A03:2021".to_string()),
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::DataAccess,
                    matched_text: format!("{}() — raw query, verify parameterization", call.callee_name),
                });
            }

            // N+1-prone: a find/findOne/get call made from inside a loop body
            // can't be seen from call sites alone; flag calls inside another
            // call's caller_function named like a loop helper (forEach/map).
            if matches!(call.callee_name.as_str(), "findOne" | "find_one" | "get" | "First")
                && matches!(
                    call.caller_function.as_deref(),
                    Some(f) if f.contains("each") || f.contains("map") || f.contains("loop")
                )
            {
                matches.push(PatternMatch {
                    file: ctx.file.to_string(),
                    line: call.line,
                    column: call.column,
                    pattern_id: "DATA-NPLUS1-001".to_string(),
                    confidence: 0.55,
                    cwe_ids: SmallVec::new(),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::DataAccess,
                    matched_text: format!("{}() inside an iteration helper — possible N+1", call.callee_name),
                });
            }
        }

        matches
    }
}
