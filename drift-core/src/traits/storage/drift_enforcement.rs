//! `IDriftEnforcement` trait — violations, health trends, detector feedback.
//!
//! Maps to `drift-storage/src/queries/enforcement.rs`.

use crate::errors::StorageError;
use std::sync::Arc;

// ─── Row Types ──────────────────────────────────────────────────────

/// A derived violation, fingerprinted and cursor-paginated at the query layer.
#[derive(Debug, Clone)]
pub struct ViolationRow {
    pub id: String,
    pub file: String,
    pub line: u32,
    pub column: Option<u32>,
    pub end_line: Option<u32>,
    pub end_column: Option<u32>,
    pub severity: String,
    pub pattern_id: String,
    pub rule_id: String,
    pub message: String,
    /// Content-based fingerprint, stable across reformatting of surrounding code.
    pub fingerprint: String,
    pub cwe_id: Option<u32>,
    pub owasp_category: Option<String>,
    pub suppressed: bool,
    pub is_new: bool,
    pub created_at: u64,
}

#[derive(Debug, Clone)]
pub struct HealthTrendRow {
    pub metric_name: String,
    pub metric_value: f64,
    pub recorded_at: u64,
}

/// An operator action taken on a violation; feeds the per-detector
/// false-positive rate used to decide whether a detector crosses the
/// 20%-over-30-days disable threshold.
#[derive(Debug, Clone)]
pub struct FeedbackRow {
    pub violation_id: String,
    pub pattern_id: String,
    pub detector_id: String,
    pub action: String,
    pub dismissal_reason: Option<String>,
    pub reason: Option<String>,
    pub author: Option<String>,
    pub created_at: u64,
}

#[derive(Debug, Clone, Default)]
pub struct FeedbackStats {
    pub total_count: u32,
    pub fix_count: u32,
    pub dismiss_count: u32,
    pub suppress_count: u32,
    pub escalate_count: u32,
}

// ─── Trait ───────────────────────────────────────────────────────────

/// Enforcement storage operations.
///
/// Covers: violations, health_trends, feedback. Gate/policy orchestration
/// tables belong to the CI-gate consumer, an external collaborator.
pub trait IDriftEnforcement: Send + Sync {
    // ── violations ──

    fn insert_violation(&self, v: &ViolationRow) -> Result<(), StorageError>;
    fn query_violations_by_file(&self, file: &str) -> Result<Vec<ViolationRow>, StorageError>;
    fn query_all_violations(&self) -> Result<Vec<ViolationRow>, StorageError>;
    fn find_violation_by_fingerprint(
        &self,
        fingerprint: &str,
    ) -> Result<Option<ViolationRow>, StorageError>;

    // ── health_trends ──

    fn insert_health_trend(&self, metric_name: &str, metric_value: f64) -> Result<(), StorageError>;
    fn query_health_trends(&self, metric_name: &str, limit: u32) -> Result<Vec<HealthTrendRow>, StorageError>;

    // ── feedback ──

    fn insert_feedback(&self, f: &FeedbackRow) -> Result<(), StorageError>;
    fn query_feedback_by_detector(&self, detector_id: &str) -> Result<Vec<FeedbackRow>, StorageError>;
    fn query_feedback_by_pattern(&self, pattern_id: &str) -> Result<Vec<FeedbackRow>, StorageError>;
    fn get_violation_pattern_id(&self, violation_id: &str) -> Result<Option<String>, StorageError>;
    fn query_feedback_stats(&self, detector_id: &str) -> Result<FeedbackStats, StorageError>;
    /// False-positive rate for a detector over the trailing `window_days`,
    /// used to decide whether it crosses the 20%-over-30-days threshold.
    fn detector_false_positive_rate(
        &self,
        detector_id: &str,
        window_days: u32,
    ) -> Result<f64, StorageError>;
}

// ─── Arc blanket impl ───────────────────────────────────────────────

impl<T: IDriftEnforcement + ?Sized> IDriftEnforcement for Arc<T> {
    fn insert_violation(&self, v: &ViolationRow) -> Result<(), StorageError> {
        (**self).insert_violation(v)
    }
    fn query_violations_by_file(&self, f: &str) -> Result<Vec<ViolationRow>, StorageError> {
        (**self).query_violations_by_file(f)
    }
    fn query_all_violations(&self) -> Result<Vec<ViolationRow>, StorageError> {
        (**self).query_all_violations()
    }
    fn find_violation_by_fingerprint(
        &self,
        fingerprint: &str,
    ) -> Result<Option<ViolationRow>, StorageError> {
        (**self).find_violation_by_fingerprint(fingerprint)
    }
    fn insert_health_trend(&self, mn: &str, mv: f64) -> Result<(), StorageError> {
        (**self).insert_health_trend(mn, mv)
    }
    fn query_health_trends(&self, mn: &str, limit: u32) -> Result<Vec<HealthTrendRow>, StorageError> {
        (**self).query_health_trends(mn, limit)
    }
    fn insert_feedback(&self, f: &FeedbackRow) -> Result<(), StorageError> {
        (**self).insert_feedback(f)
    }
    fn query_feedback_by_detector(&self, did: &str) -> Result<Vec<FeedbackRow>, StorageError> {
        (**self).query_feedback_by_detector(did)
    }
    fn query_feedback_by_pattern(&self, pid: &str) -> Result<Vec<FeedbackRow>, StorageError> {
        (**self).query_feedback_by_pattern(pid)
    }
    fn get_violation_pattern_id(&self, vid: &str) -> Result<Option<String>, StorageError> {
        (**self).get_violation_pattern_id(vid)
    }
    fn query_feedback_stats(&self, detector_id: &str) -> Result<FeedbackStats, StorageError> {
        (**self).query_feedback_stats(detector_id)
    }
    fn detector_false_positive_rate(
        &self,
        detector_id: &str,
        window_days: u32,
    ) -> Result<f64, StorageError> {
        (**self).detector_false_positive_rate(detector_id, window_days)
    }
}
