//! The five factors that shape a pattern's α/β updates between scans (§4.10).

use super::types::MomentumDirection;

const AGE_SATURATION_DAYS: f64 = 90.0;

/// Raw inputs for the five-factor model, gathered from the aggregated
/// pattern and scorer-level context (category totals, momentum history).
#[derive(Debug, Clone)]
pub struct FactorInput {
    pub occurrences: u32,
    pub total_locations: u32,
    pub variance: f64,
    pub days_since_first_seen: u32,
    pub file_count: u32,
    pub total_files: u32,
    pub momentum: MomentumDirection,
    pub data_quality: Option<f64>,
}

/// Each factor normalized to `[0, 1]`.
#[derive(Debug, Clone, Copy)]
pub struct FactorScores {
    pub frequency: f64,
    pub consistency: f64,
    pub age: f64,
    pub spread: f64,
    pub momentum: f64,
}

pub fn compute_factors(input: &FactorInput) -> FactorScores {
    let frequency = if input.total_locations == 0 {
        0.0
    } else {
        (input.occurrences as f64 / input.total_locations as f64).clamp(0.0, 1.0)
    };
    let consistency = (1.0 - input.variance).clamp(0.0, 1.0);
    let age = (input.days_since_first_seen as f64 / AGE_SATURATION_DAYS).clamp(0.0, 1.0);
    let spread = if input.total_files == 0 {
        0.0
    } else {
        (input.file_count as f64 / input.total_files as f64).clamp(0.0, 1.0)
    };
    let momentum = match input.momentum {
        MomentumDirection::Rising => 1.0,
        MomentumDirection::Stable => 0.5,
        MomentumDirection::Falling => 0.0,
    };

    let mut scores = FactorScores { frequency, consistency, age, spread, momentum };
    if let Some(quality) = input.data_quality {
        scores.frequency *= quality.clamp(0.0, 1.0).max(0.01);
    }
    scores
}

/// Composite of the five factors: frequency 0.30, consistency 0.20, age
/// 0.15, spread 0.20, momentum 0.15.
pub fn weighted_score(scores: &FactorScores) -> f64 {
    scores.frequency * 0.30
        + scores.consistency * 0.20
        + scores.age * 0.15
        + scores.spread * 0.20
        + scores.momentum * 0.15
}

/// Converts factor scores into (α, β) contributions on top of the Beta(1,1)
/// uniform prior, scaled by the number of observed trials.
pub fn factors_to_alpha_beta(scores: &FactorScores, total_trials: u32) -> (f64, f64) {
    let composite = weighted_score(scores).clamp(0.0, 1.0);
    let trials = total_trials as f64;
    let alpha = 1.0 + composite * trials;
    let beta = 1.0 + (1.0 - composite) * trials;
    (alpha, beta)
}
