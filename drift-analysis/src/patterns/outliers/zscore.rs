//! Z-score with iterative masking, capped at 3 iterations (§4.11: n≥30, |z|>threshold).

use super::types::{DeviationScore, OutlierMethod, OutlierResult, SignificanceTier};

pub fn detect(values: &[f64], threshold: f64, max_iterations: u32) -> Vec<OutlierResult> {
    let n = values.len();
    if n < 2 {
        return Vec::new();
    }

    let mut masked = vec![false; n];
    let mut results = Vec::new();

    for _ in 0..max_iterations.max(1) {
        let active: Vec<usize> = (0..n).filter(|&i| !masked[i]).collect();
        if active.len() < 2 {
            break;
        }
        let mean = active.iter().map(|&i| values[i]).sum::<f64>() / active.len() as f64;
        let variance = active.iter().map(|&i| (values[i] - mean).powi(2)).sum::<f64>() / active.len() as f64;
        let stddev = variance.sqrt();

        if stddev <= 0.0 || !stddev.is_finite() {
            break;
        }

        let mut found_this_round = false;
        for &i in &active {
            let z = (values[i] - mean) / stddev;
            if z.abs() > threshold {
                masked[i] = true;
                found_this_round = true;
                let deviation = DeviationScore::new((z.abs() - threshold) / threshold);
                results.push(OutlierResult {
                    index: i,
                    value: values[i],
                    test_statistic: z,
                    deviation_score: deviation,
                    significance: SignificanceTier::from_deviation(deviation.value()),
                    method: OutlierMethod::ZScore,
                    is_outlier: true,
                });
            }
        }

        if !found_this_round {
            break;
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_data_has_no_outliers() {
        let values = vec![1.0; 40];
        assert!(detect(&values, 2.5, 3).is_empty());
    }

    #[test]
    fn flags_single_extreme_value() {
        let mut values = vec![10.0; 40];
        values[0] = 500.0;
        let results = detect(&values, 2.5, 3);
        assert!(results.iter().any(|r| r.index == 0));
    }
}
