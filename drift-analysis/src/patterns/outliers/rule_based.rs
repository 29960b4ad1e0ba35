//! Rule-based outlier detection — the only method active below the
//! minimum sample size, and always run as a supplementary check (§4.11).

use super::types::{DeviationScore, OutlierMethod, OutlierResult, SignificanceTier};

/// A structural predicate over the raw value series.
pub struct OutlierRule {
    pub name: &'static str,
    predicate: fn(&[f64], usize) -> Option<f64>,
}

impl OutlierRule {
    pub fn new(name: &'static str, predicate: fn(&[f64], usize) -> Option<f64>) -> Self {
        Self { name, predicate }
    }
}

pub fn detect(values: &[f64], rules: &[OutlierRule]) -> Vec<OutlierResult> {
    let mut results = Vec::new();
    for (idx, &val) in values.iter().enumerate() {
        for rule in rules {
            if let Some(deviation_value) = (rule.predicate)(values, idx) {
                let deviation = DeviationScore::new(deviation_value);
                results.push(OutlierResult {
                    index: idx,
                    value: val,
                    test_statistic: deviation_value,
                    deviation_score: deviation,
                    significance: SignificanceTier::from_deviation(deviation.value()),
                    method: OutlierMethod::RuleBased,
                    is_outlier: true,
                });
            }
        }
    }
    results
}

/// Flags values that are exactly zero — a pattern with zero conforming
/// confidence is always worth surfacing, regardless of sample size.
pub fn zero_confidence_rule() -> OutlierRule {
    OutlierRule::new("zero_confidence", |values, idx| {
        if values[idx] == 0.0 {
            Some(1.0)
        } else {
            None
        }
    })
}

/// Flags a value that drops to less than half the median of the series —
/// a confidence cliff relative to its peers.
pub fn confidence_cliff_rule() -> OutlierRule {
    OutlierRule::new("confidence_cliff", |values, idx| {
        if values.len() < 3 {
            return None;
        }
        let median = median_of(values);
        if median <= 0.0 {
            return None;
        }
        let val = values[idx];
        if val < median * 0.5 {
            Some(((median - val) / median).clamp(0.0, 1.0))
        } else {
            None
        }
    })
}

/// Flags a value that sits alone far outside the range spanned by the rest
/// of the series — the file-isolation case (a single divergent location).
pub fn file_isolation_rule() -> OutlierRule {
    OutlierRule::new("file_isolation", |values, idx| {
        if values.len() < 4 {
            return None;
        }
        let others: Vec<f64> = values
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != idx)
            .map(|(_, &v)| v)
            .collect();
        let min_other = others.iter().cloned().fold(f64::INFINITY, f64::min);
        let max_other = others.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let range = max_other - min_other;
        if range <= 0.0 {
            return None;
        }
        let val = values[idx];
        let distance = if val < min_other {
            min_other - val
        } else if val > max_other {
            val - max_other
        } else {
            return None;
        };
        if distance > range {
            Some((distance / range).clamp(0.0, 1.0))
        } else {
            None
        }
    })
}

fn median_of(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}
