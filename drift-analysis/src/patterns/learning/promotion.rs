//! Promotion: `Discovered → Approved` when tier Established and spread ≥5
//! files (§4.12); operator actions override elsewhere in the enforcement loop.

use std::collections::HashMap;

use crate::patterns::confidence::types::ConfidenceTier;

use super::types::{Convention, PromotionStatus};

#[derive(Debug, Clone)]
pub struct PromotionConfig {
    pub min_files: u64,
}

impl Default for PromotionConfig {
    fn default() -> Self {
        Self { min_files: 5 }
    }
}

/// Whether `convention` qualifies for promotion given its current file spread.
pub fn check_promotion(convention: &Convention, config: &PromotionConfig, file_spread: Option<u64>) -> bool {
    if convention.confidence_score.tier != ConfidenceTier::Established {
        return false;
    }
    match file_spread {
        Some(spread) => spread >= config.min_files,
        None => false,
    }
}

/// Promote every `Discovered` convention whose pattern's file spread (looked
/// up by pattern_id) clears the bar. Returns the number promoted.
pub fn promote_batch_with_spread(
    conventions: &mut [Convention],
    config: &PromotionConfig,
    spread_by_pattern_id: &HashMap<String, u64>,
) -> usize {
    let mut promoted = 0;
    for convention in conventions.iter_mut() {
        if convention.promotion_status != PromotionStatus::Discovered {
            continue;
        }
        let spread = spread_by_pattern_id.get(&convention.pattern_id).copied();
        if check_promotion(convention, config, spread) {
            convention.promotion_status = PromotionStatus::Approved;
            promoted += 1;
        }
    }
    promoted
}
