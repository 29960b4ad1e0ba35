//! Convention types persisted by the learning subsystem (§4.12).

use std::collections::HashMap;

use crate::patterns::confidence::types::ConfidenceScore;

/// Convention category, per the §4.12 classification rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConventionCategory {
    Universal,
    ProjectSpecific,
    Emerging,
    Legacy,
    Contested,
}

/// Where a convention applies — the whole project, or a concentrated directory.
#[derive(Debug, Clone, PartialEq)]
pub enum ConventionScope {
    Project,
    Directory(String),
}

/// Lifecycle status of a discovered convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromotionStatus {
    Discovered,
    Approved,
    Rejected,
    Expired,
}

/// A learned convention: a pattern promoted to project-level status.
#[derive(Debug, Clone)]
pub struct Convention {
    pub id: String,
    pub pattern_id: String,
    pub category: ConventionCategory,
    pub scope: ConventionScope,
    pub confidence_score: ConfidenceScore,
    pub dominance_ratio: f64,
    pub discovery_date: u64,
    pub last_seen: u64,
    pub promotion_status: PromotionStatus,
    pub observation_count: u64,
    pub scan_count: u64,
}

impl Convention {
    /// How settled this convention is: narrow credible interval and high
    /// dominance both push this toward 1.0.
    pub fn convergence_score(&self) -> f64 {
        let width = self.confidence_score.ci_high - self.confidence_score.ci_low;
        let ci_component = (1.0 - width).clamp(0.0, 1.0);
        (ci_component * 0.7 + self.dominance_ratio.clamp(0.0, 1.0) * 0.3).clamp(0.0, 1.0)
    }
}

/// Discovery thresholds (§4.12: min occurrences ≥3, file spread ≥2,
/// dominance ratio ≥0.60; contested gap <20%; universal spread ≥80%).
#[derive(Debug, Clone)]
pub struct LearningConfig {
    pub min_occurrences: u64,
    pub min_files: u64,
    pub dominance_threshold: f64,
    pub contested_threshold: f64,
    pub universal_spread_threshold: f64,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            min_occurrences: 3,
            min_files: 2,
            dominance_threshold: 0.60,
            contested_threshold: 0.20,
            universal_spread_threshold: 0.80,
        }
    }
}

/// Persistence boundary for conventions — backed by `drift-storage` in
/// production, swappable for tests.
pub trait ConventionStore {
    fn load_all(&self) -> Vec<Convention>;
    fn load_by_pattern_id(&self, pattern_id: &str) -> Option<Convention>;
    fn save(&mut self, convention: &Convention);
}

/// An in-memory `ConventionStore`, used by tests and as a scratch store
/// before a workspace database is attached.
#[derive(Debug, Default)]
pub struct InMemoryConventionStore {
    by_pattern_id: HashMap<String, Convention>,
}

impl InMemoryConventionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.by_pattern_id.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_pattern_id.len()
    }
}

impl ConventionStore for InMemoryConventionStore {
    fn load_all(&self) -> Vec<Convention> {
        self.by_pattern_id.values().cloned().collect()
    }

    fn load_by_pattern_id(&self, pattern_id: &str) -> Option<Convention> {
        self.by_pattern_id.get(pattern_id).cloned()
    }

    fn save(&mut self, convention: &Convention) {
        self.by_pattern_id.insert(convention.pattern_id.clone(), convention.clone());
    }
}

/// Aggregate counts over a discovery run, for reporting and dashboards.
#[derive(Debug, Clone, Default)]
pub struct LearningDiagnostics {
    pub total_conventions: usize,
    pub per_category: HashMap<ConventionCategory, usize>,
    pub per_status: HashMap<PromotionStatus, usize>,
}

impl LearningDiagnostics {
    pub fn from_conventions(conventions: &[Convention]) -> Self {
        let mut per_category = HashMap::new();
        let mut per_status = HashMap::new();
        for c in conventions {
            *per_category.entry(c.category).or_insert(0) += 1;
            *per_status.entry(c.promotion_status).or_insert(0) += 1;
        }
        Self { total_conventions: conventions.len(), per_category, per_status }
    }
}
