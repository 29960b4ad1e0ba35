//! Momentum tracking and temporal decay (§4.10, factor 5).

use super::types::MomentumDirection;

const RISING_FALLING_THRESHOLD: f64 = 0.05;
const GRACE_PERIOD_DAYS: u32 = 7;
const HALF_LIFE_DAYS: f64 = 23.0;
const HISTORY_CAP: usize = 20;

/// Temporal decay applied once a pattern has been unseen past the grace
/// period: no decay in the first week, then exponential decay with a
/// 23-day half-life so the tier has visibly dropped by 90 days.
pub fn temporal_decay(days_unseen: u32) -> f64 {
    if days_unseen <= GRACE_PERIOD_DAYS {
        1.0
    } else {
        let over = (days_unseen - GRACE_PERIOD_DAYS) as f64;
        0.5f64.powf(over / HALF_LIFE_DAYS)
    }
}

/// Tracks a pattern's per-scan frequency to classify Rising/Falling/Stable
/// momentum from the normalized first difference.
#[derive(Debug, Clone, Default)]
pub struct MomentumTracker {
    history: Vec<i64>,
}

impl MomentumTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, value: u32) {
        self.history.push(value as i64);
        if self.history.len() > HISTORY_CAP {
            self.history.remove(0);
        }
    }

    pub fn direction(&self) -> MomentumDirection {
        if self.history.len() < 2 {
            return MomentumDirection::Stable;
        }
        let diffs: Vec<f64> = self.history.windows(2).map(|w| (w[1] - w[0]) as f64).collect();
        let avg_diff = diffs.iter().sum::<f64>() / diffs.len() as f64;
        let mean = self.history.iter().map(|&v| v as f64).sum::<f64>() / self.history.len() as f64;

        if mean.abs() < f64::EPSILON {
            return MomentumDirection::Stable;
        }

        let normalized = avg_diff / mean.abs();
        if normalized > RISING_FALLING_THRESHOLD {
            MomentumDirection::Rising
        } else if normalized < -RISING_FALLING_THRESHOLD {
            MomentumDirection::Falling
        } else {
            MomentumDirection::Stable
        }
    }
}
