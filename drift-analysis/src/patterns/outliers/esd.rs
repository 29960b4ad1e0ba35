//! Generalized Extreme Studentized Deviate test (§4.11: n≥25, suspected
//! multiple outliers). `max_outliers` is the sqrt-heuristic cap from the
//! caller (selector.rs).

use super::types::{DeviationScore, OutlierMethod, OutlierResult, SignificanceTier};

pub fn detect(values: &[f64], max_outliers: usize, alpha: f64) -> Vec<OutlierResult> {
    let n = values.len();
    if n < 3 || max_outliers == 0 {
        return Vec::new();
    }

    let mut masked = vec![false; n];
    let mut candidates: Vec<(usize, f64, f64)> = Vec::new(); // (index, test_statistic, critical)

    for i in 0..max_outliers.min(n - 2) {
        let active: Vec<usize> = (0..n).filter(|&j| !masked[j]).collect();
        if active.len() < 3 {
            break;
        }
        let mean = active.iter().map(|&j| values[j]).sum::<f64>() / active.len() as f64;
        let variance = active.iter().map(|&j| (values[j] - mean).powi(2)).sum::<f64>() / active.len() as f64;
        let stddev = variance.sqrt();
        if stddev <= 0.0 || !stddev.is_finite() {
            break;
        }

        let (worst_idx, worst_r) = active
            .iter()
            .map(|&j| (j, (values[j] - mean).abs() / stddev))
            .fold((active[0], 0.0), |acc, cur| if cur.1 > acc.1 { cur } else { acc });

        let remaining = active.len();
        let critical = esd_critical_value(remaining, alpha);
        masked[worst_idx] = true;
        candidates.push((worst_idx, worst_r, critical));
        let _ = i;
    }

    // ESD rule: find the largest k such that all R_1..R_k exceed their critical values.
    let mut cutoff = 0;
    for (i, &(_, r, critical)) in candidates.iter().enumerate() {
        if r > critical {
            cutoff = i + 1;
        }
    }

    candidates
        .into_iter()
        .take(cutoff)
        .map(|(idx, r, critical)| {
            let deviation = DeviationScore::new((r - critical) / critical.max(1e-9));
            OutlierResult {
                index: idx,
                value: values[idx],
                test_statistic: r,
                deviation_score: deviation,
                significance: SignificanceTier::from_deviation(deviation.value()),
                method: OutlierMethod::GeneralizedEsd,
                is_outlier: true,
            }
        })
        .collect()
}

/// Approximate ESD critical value, scaling the z-quantile by sample size
/// the way Rosner's lambda statistic does.
fn esd_critical_value(n: usize, alpha: f64) -> f64 {
    let n_f = n as f64;
    let p = 1.0 - alpha / (2.0 * n_f);
    let z = super::stats::inverse_normal_cdf(p);
    ((n_f - 1.0) * z) / (n_f * (n_f - 2.0 + z * z)).sqrt().max(1e-9) * n_f.sqrt()
}
