//! Styling detector (skeleton) — a file mixing tab and space indentation.

use smallvec::SmallVec;

use crate::detectors::traits::{Detector, DetectorCategory, DetectorVariant};
use crate::engine::types::{DetectionMethod, PatternCategory, PatternMatch};
use crate::engine::visitor::DetectionContext;

pub struct StylingDetector;

impl Detector for StylingDetector {
    fn id(&self) -> &str { "styling-base" }
    fn category(&self) -> DetectorCategory { DetectorCategory::Styling }
    fn variant(&self) -> DetectorVariant { DetectorVariant::Base }

    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch> {
        let mut has_tab_indent = false;
        let mut has_space_indent = false;
        for (i, line) in ctx.source.split(|&b| b == b'\n').enumerate() {
            if let Some(&first) = line.first() {
                if first == b'\t' {
                    has_tab_indent = true;
                } else if first == b' ' {
                    has_space_indent = true;
                }
            }
            if has_tab_indent && has_space_indent {
                return vec![PatternMatch {
                    file: ctx.file.to_string(),
                    line: i as u32 + 1,
                    column: 0,
                    pattern_id: "STYLE-MIXEDINDENT-001".to_string(),
                    confidence: 0.35,
                    cwe_ids: SmallVec::new(),
                    owasp: None,
                    detection_method: DetectionMethod::AstVisitor,
                    category: PatternCategory::Styling,
                    matched_text: "file mixes tab and space indentation".to_string(),
                }];
            }
        }
        Vec::new()
    }
}
