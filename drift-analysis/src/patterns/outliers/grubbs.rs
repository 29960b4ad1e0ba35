//! Grubbs' test for a single outlier at a time, iterated with a 3-round cap
//! (§4.11: 10 ≤ n < 25).

use super::types::{DeviationScore, OutlierMethod, OutlierResult, SignificanceTier};

const MAX_ROUNDS: u32 = 3;

pub fn detect(values: &[f64], alpha: f64) -> Vec<OutlierResult> {
    let n = values.len();
    if n < 3 {
        return Vec::new();
    }

    let mut masked = vec![false; n];
    let mut results = Vec::new();

    for _ in 0..MAX_ROUNDS {
        let active: Vec<usize> = (0..n).filter(|&i| !masked[i]).collect();
        if active.len() < 3 {
            break;
        }
        let mean = active.iter().map(|&i| values[i]).sum::<f64>() / active.len() as f64;
        let variance = active.iter().map(|&i| (values[i] - mean).powi(2)).sum::<f64>() / active.len() as f64;
        let stddev = variance.sqrt();
        if stddev <= 0.0 || !stddev.is_finite() {
            break;
        }

        let (worst_idx, worst_g) = active
            .iter()
            .map(|&i| (i, (values[i] - mean).abs() / stddev))
            .fold((active[0], 0.0), |acc, cur| if cur.1 > acc.1 { cur } else { acc });

        let critical = grubbs_critical_value(active.len(), alpha);
        if worst_g <= critical {
            break;
        }

        masked[worst_idx] = true;
        let deviation = DeviationScore::new((worst_g - critical) / critical);
        results.push(OutlierResult {
            index: worst_idx,
            value: values[worst_idx],
            test_statistic: worst_g,
            deviation_score: deviation,
            significance: SignificanceTier::from_deviation(deviation.value()),
            method: OutlierMethod::Grubbs,
            is_outlier: true,
        });
    }

    results
}

/// Approximate Grubbs' critical value via the two-sided Studentized extreme
/// deviate bound, using a fixed t-quantile approximation (good enough at the
/// sample sizes §4.11 routes through Grubbs, n ∈ [10, 25)).
fn grubbs_critical_value(n: usize, alpha: f64) -> f64 {
    let n_f = n as f64;
    let t = super::stats::student_t_quantile(alpha / (2.0 * n_f), n_f - 2.0);
    ((n_f - 1.0) / n_f.sqrt()) * (t * t / (n_f - 2.0 + t * t)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_data_has_no_outliers() {
        let values: Vec<f64> = (0..15).map(|i| 10.0 + (i % 3) as f64 * 0.1).collect();
        assert!(detect(&values, 0.05).is_empty());
    }

    #[test]
    fn flags_single_extreme_value() {
        let mut values: Vec<f64> = vec![10.0; 15];
        values[0] = 200.0;
        let results = detect(&values, 0.05);
        assert!(results.iter().any(|r| r.index == 0));
    }
}
