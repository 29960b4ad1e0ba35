//! Outlier-to-violation conversion (§4.11, §6 derived outputs).
//!
//! A `Violation` is produced for each confirmed outlier location in an
//! aggregated pattern, scoped to its file and line. Each outlier becomes
//! at most one violation.

use crate::patterns::aggregation::types::AggregatedPattern;
use crate::patterns::outliers::types::{OutlierResult, SignificanceTier};

use super::fingerprint::content_fingerprint;
use super::suppression::SuppressionChecker;

/// `error | warning | info | hint`, per §6's derived violations list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationSeverity {
    Error,
    Warning,
    Info,
    Hint,
}

impl From<SignificanceTier> for ViolationSeverity {
    fn from(tier: SignificanceTier) -> Self {
        match tier {
            SignificanceTier::Critical => Self::Error,
            SignificanceTier::High => Self::Warning,
            SignificanceTier::Moderate => Self::Info,
            SignificanceTier::Low => Self::Hint,
        }
    }
}

impl std::fmt::Display for ViolationSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Hint => "hint",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub violation_id: String,
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub pattern_id: String,
    pub severity: ViolationSeverity,
    pub message: String,
    pub fingerprint: String,
    pub is_new: bool,
}

/// One pattern's outlier results, bundled with the pattern they were
/// computed against — the unit `RulesEvaluator` consumes.
pub struct RulesInput<'a> {
    pub pattern: &'a AggregatedPattern,
    pub outliers: &'a [OutlierResult],
}

/// Converts outlier results into violations, honoring inline suppression
/// comments when source text is available.
#[derive(Default)]
pub struct RulesEvaluator {
    suppression: SuppressionChecker,
}

impl RulesEvaluator {
    pub fn new() -> Self {
        Self { suppression: SuppressionChecker::default() }
    }

    /// `source_lines` maps a file path to its content split on `\n`, used to
    /// honor `// drift-ignore` comments. Pass `None` to skip suppression.
    pub fn evaluate(
        &self,
        input: &RulesInput<'_>,
        source_lines: Option<&dyn Fn(&str) -> Option<Vec<String>>>,
    ) -> Vec<Violation> {
        let pattern = input.pattern;
        let rule_id = format!("{}/{}", pattern.category.name(), pattern.pattern_id);

        // Outlier indices are positions in `confidence_values`, which is sorted
        // ascending; realign `locations` the same way so index i refers to the
        // same observation in both.
        let mut by_confidence: Vec<&crate::patterns::aggregation::types::PatternLocation> =
            pattern.locations.iter().collect();
        by_confidence.sort_by(|a, b| {
            a.confidence.partial_cmp(&b.confidence).unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut violations = Vec::new();
        for outlier in input.outliers {
            if !outlier.is_outlier {
                continue;
            }
            let Some(location) = by_confidence.get(outlier.index) else {
                continue;
            };

            if let Some(loader) = source_lines {
                if let Some(lines) = loader(&location.file) {
                    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
                    if self.suppression.is_suppressed(location.line, Some(&rule_id), &refs) {
                        continue;
                    }
                }
            }

            let matched_text = location.matched_text.as_deref().unwrap_or("");
            let fingerprint = content_fingerprint(&rule_id, &pattern.pattern_id, matched_text);
            let severity = ViolationSeverity::from(outlier.significance);

            violations.push(Violation {
                violation_id: format!("{rule_id}-{}-{}", location.file, location.line),
                file: location.file.clone(),
                line: location.line,
                column: location.column,
                pattern_id: pattern.pattern_id.clone(),
                severity,
                message: format!(
                    "deviates from the established '{}' convention (deviation {:.2})",
                    pattern.pattern_id,
                    outlier.deviation_score.value()
                ),
                fingerprint,
                is_new: true,
            });
        }
        violations
    }
}
