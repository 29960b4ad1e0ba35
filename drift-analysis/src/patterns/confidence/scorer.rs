//! `ConfidenceScorer` — turns an aggregated pattern into a Beta-posterior
//! `ConfidenceScore` via the five-factor model (§4.10).

use crate::patterns::aggregation::types::AggregatedPattern;

use super::factors::{self, FactorInput};
use super::momentum::{self, MomentumTracker};
use super::types::{ConfidenceScore, MomentumDirection};

/// Per-pattern (α, β) adjustment accumulated from user feedback actions
/// (fix/dismiss/suppress/escalate) on past violations — the closed loop
/// that lets operator actions shift a pattern's confidence.
pub trait FeedbackStore: Send + Sync {
    fn alpha_beta_delta(&self, pattern_id: &str) -> (f64, f64);
}

#[derive(Debug, Clone)]
pub struct ScorerConfig {
    pub total_files: u32,
    pub default_age_days: u32,
    pub default_data_quality: Option<f64>,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self { total_files: 1, default_age_days: 0, default_data_quality: None }
    }
}

pub struct ConfidenceScorer {
    config: ScorerConfig,
    feedback_store: Option<Box<dyn FeedbackStore>>,
}

impl ConfidenceScorer {
    pub fn new(config: ScorerConfig) -> Self {
        Self { config, feedback_store: None }
    }

    pub fn with_feedback_store(mut self, store: Box<dyn FeedbackStore>) -> Self {
        self.feedback_store = Some(store);
        self
    }

    fn factor_input(
        &self,
        pattern: &AggregatedPattern,
        momentum: MomentumDirection,
        days_since_first_seen: u32,
        total_locations_override: Option<u32>,
        data_quality: Option<f64>,
    ) -> FactorInput {
        let conforming = pattern.location_count.saturating_sub(pattern.outlier_count);
        let cv = if pattern.confidence_mean.abs() > f64::EPSILON {
            (pattern.confidence_stddev / pattern.confidence_mean).clamp(0.0, 1.0)
        } else {
            0.0
        };
        FactorInput {
            occurrences: conforming,
            total_locations: total_locations_override.unwrap_or(pattern.location_count).max(pattern.location_count),
            variance: cv,
            days_since_first_seen,
            file_count: pattern.file_spread,
            total_files: self.config.total_files,
            momentum,
            data_quality: data_quality.or(self.config.default_data_quality),
        }
    }

    fn apply_feedback(&self, pattern_id: &str, alpha: f64, beta: f64) -> (f64, f64) {
        match &self.feedback_store {
            Some(store) => {
                let (da, db) = store.alpha_beta_delta(pattern_id);
                ((alpha + da).max(1.0), (beta + db).max(1.0))
            }
            None => (alpha, beta),
        }
    }

    /// Score one pattern with an explicit momentum and category-level trial
    /// count (the call the pattern-intelligence pipeline makes per pattern).
    pub fn score(
        &self,
        pattern: &AggregatedPattern,
        momentum: MomentumDirection,
        days_since_first_seen: u32,
        category_total: Option<u64>,
        data_quality: Option<f64>,
    ) -> ConfidenceScore {
        let total_locations_override = category_total.map(|t| t.min(u32::MAX as u64) as u32);
        let input = self.factor_input(pattern, momentum, days_since_first_seen, total_locations_override, data_quality);
        let scores = factors::compute_factors(&input);
        let (alpha, beta) = factors::factors_to_alpha_beta(&scores, pattern.location_count);
        let (alpha, beta) = self.apply_feedback(&pattern.pattern_id, alpha, beta);
        ConfidenceScore::from_params(alpha, beta, momentum)
    }

    /// Score a batch of patterns, optionally informed by per-pattern momentum history.
    pub fn score_batch(
        &self,
        patterns: &[AggregatedPattern],
        trackers: Option<&std::collections::HashMap<String, MomentumTracker>>,
    ) -> Vec<(String, ConfidenceScore)> {
        patterns
            .iter()
            .map(|pattern| {
                let direction = trackers
                    .and_then(|t| t.get(&pattern.pattern_id))
                    .map(|t| t.direction())
                    .unwrap_or(MomentumDirection::Stable);
                let score = self.score(pattern, direction, self.config.default_age_days, None, None);
                (pattern.pattern_id.clone(), score)
            })
            .collect()
    }

    /// Score a single pattern with an explicit momentum tracker and
    /// staleness, applying temporal decay when the pattern has gone unseen.
    pub fn score_with_momentum(
        &self,
        pattern: &AggregatedPattern,
        tracker: &MomentumTracker,
        age_days: u32,
        days_unseen: u32,
    ) -> ConfidenceScore {
        let direction = tracker.direction();
        let input = self.factor_input(pattern, direction, age_days, None, None);
        let scores = factors::compute_factors(&input);
        let (alpha, beta) = factors::factors_to_alpha_beta(&scores, pattern.location_count);

        let decay = momentum::temporal_decay(days_unseen);
        let decayed_alpha = (1.0 + (alpha - 1.0) * decay).max(1.0);
        let decayed_beta = (1.0 + (beta - 1.0) * decay).max(1.0);
        let (decayed_alpha, decayed_beta) = self.apply_feedback(&pattern.pattern_id, decayed_alpha, decayed_beta);

        ConfidenceScore::from_params(decayed_alpha, decayed_beta, direction)
    }
}
