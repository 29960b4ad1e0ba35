//! IQR fencing (§4.11: 10 ≤ n < 30, non-normal; default 1.5× fence).

use super::types::{DeviationScore, OutlierMethod, OutlierResult, SignificanceTier};

pub fn detect(values: &[f64], multiplier: f64) -> Vec<OutlierResult> {
    let n = values.len();
    if n < 4 {
        return Vec::new();
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let q1 = percentile(&sorted, 0.25);
    let q3 = percentile(&sorted, 0.75);
    let iqr = q3 - q1;

    if iqr <= 0.0 || !iqr.is_finite() {
        return Vec::new();
    }

    let lower_fence = q1 - multiplier * iqr;
    let upper_fence = q3 + multiplier * iqr;

    let mut results = Vec::new();
    for (idx, &val) in values.iter().enumerate() {
        if val < lower_fence || val > upper_fence {
            let distance = if val < lower_fence { lower_fence - val } else { val - upper_fence };
            let deviation = DeviationScore::new(distance / iqr);
            results.push(OutlierResult {
                index: idx,
                value: val,
                test_statistic: distance / iqr,
                deviation_score: deviation,
                significance: SignificanceTier::from_deviation(deviation.value()),
                method: OutlierMethod::Iqr,
                is_outlier: true,
            });
        }
    }
    results
}

/// Linear-interpolation percentile over an already-sorted slice.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = p * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = rank - lo as f64;
        sorted[lo] * (1.0 - frac) + sorted[hi] * frac
    }
}
