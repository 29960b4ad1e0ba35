//! Convention-learning thresholds: discovery triggers, contested-gap rule,
//! promotion/expiry windows.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LearningConfig {
    /// Minimum occurrences before a pattern is eligible for discovery. Default: 3.
    pub min_occurrences: Option<u32>,
    /// Minimum distinct-file spread. Default: 2.
    pub min_file_spread: Option<u32>,
    /// Dominance ratio over alternatives required to discover. Default: 0.60.
    pub dominance_threshold: Option<f64>,
    /// Gap between top two alternatives below which a gene is Contested. Default: 0.20.
    pub contested_gap: Option<f64>,
    /// Files changed fraction since last learn that forces a full re-learn (L3). Default: 0.10.
    pub relearn_threshold: Option<f64>,
    /// Days of absence after which a convention is marked Expired. Default: 90.
    pub expiry_days: Option<u32>,
    /// Spread (file count) required for Discovered -> Approved promotion. Default: 5.
    pub promotion_min_spread: Option<u32>,
}

impl LearningConfig {
    pub fn effective_min_occurrences(&self) -> u32 {
        self.min_occurrences.unwrap_or(3)
    }
    pub fn effective_min_file_spread(&self) -> u32 {
        self.min_file_spread.unwrap_or(2)
    }
    pub fn effective_dominance_threshold(&self) -> f64 {
        self.dominance_threshold.unwrap_or(0.60)
    }
    pub fn effective_contested_gap(&self) -> f64 {
        self.contested_gap.unwrap_or(0.20)
    }
    pub fn effective_relearn_threshold(&self) -> f64 {
        self.relearn_threshold.unwrap_or(0.10)
    }
    pub fn effective_expiry_days(&self) -> u32 {
        self.expiry_days.unwrap_or(90)
    }
    pub fn effective_promotion_min_spread(&self) -> u32 {
        self.promotion_min_spread.unwrap_or(5)
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            min_occurrences: other.min_occurrences.or(self.min_occurrences),
            min_file_spread: other.min_file_spread.or(self.min_file_spread),
            dominance_threshold: other.dominance_threshold.or(self.dominance_threshold),
            contested_gap: other.contested_gap.or(self.contested_gap),
            relearn_threshold: other.relearn_threshold.or(self.relearn_threshold),
            expiry_days: other.expiry_days.or(self.expiry_days),
            promotion_min_spread: other.promotion_min_spread.or(self.promotion_min_spread),
        }
    }
}
