//! Confidence score types — Beta-posterior parameters, tier, momentum (§4.10).

use serde::{Deserialize, Serialize};

use super::beta::{self, BetaPosterior};

/// Graduated confidence tier, classified from the posterior mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfidenceTier {
    Established,
    Emerging,
    Tentative,
    Uncertain,
}

impl ConfidenceTier {
    /// Established requires mean ≥0.85 AND CI half-width <0.075; Emerging
    /// requires mean ≥0.70 AND half-width <0.125; Tentative only needs
    /// mean ≥0.50 (no width requirement); Uncertain otherwise (§4.10). A wide
    /// interval demotes a pattern that would otherwise qualify by mean alone —
    /// e.g. mean=0.86 with half-width=0.20 lands in Tentative, not Established.
    pub fn from_posterior_mean(mean: f64, ci_half_width: f64) -> Self {
        if mean >= 0.85 && ci_half_width < 0.075 {
            Self::Established
        } else if mean >= 0.70 && ci_half_width < 0.125 {
            Self::Emerging
        } else if mean >= 0.50 {
            Self::Tentative
        } else {
            Self::Uncertain
        }
    }
}

/// Trend direction of a pattern's frequency across scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MomentumDirection {
    Rising,
    Falling,
    Stable,
}

/// A scored pattern: Beta(α, β) posterior, its 95% credible interval, tier
/// and momentum. Invariant: α ≥ 1, β ≥ 1, posterior_mean ∈ [0, 1].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConfidenceScore {
    pub alpha: f64,
    pub beta: f64,
    pub posterior_mean: f64,
    pub ci_low: f64,
    pub ci_high: f64,
    pub tier: ConfidenceTier,
    pub momentum: MomentumDirection,
}

impl ConfidenceScore {
    pub fn from_params(alpha: f64, beta: f64, momentum: MomentumDirection) -> Self {
        let mean = BetaPosterior::posterior_mean(alpha, beta);
        let (ci_low, ci_high) = beta::credible_interval(alpha, beta, 0.95);
        let half_width = (ci_high - ci_low) / 2.0;
        Self {
            alpha,
            beta,
            posterior_mean: mean,
            ci_low,
            ci_high,
            tier: ConfidenceTier::from_posterior_mean(mean, half_width),
            momentum,
        }
    }

    /// Beta(1, 1) — the uninformative prior used before any observations.
    pub fn uniform_prior() -> Self {
        Self::from_params(1.0, 1.0, MomentumDirection::Stable)
    }

    /// §4.10 composite score: posterior mean weighted with consistency and momentum.
    pub fn composite(&self, consistency: f64, momentum_score: f64) -> f64 {
        self.posterior_mean * 0.70 + consistency.clamp(0.0, 1.0) * 0.15 + momentum_score.clamp(0.0, 1.0) * 0.15
    }

    /// Half-width of the 95% credible interval.
    pub fn ci_half_width(&self) -> f64 {
        (self.ci_high - self.ci_low) / 2.0
    }
}
