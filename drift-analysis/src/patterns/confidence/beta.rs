//! Beta-posterior arithmetic (§4.10), sanitized against NaN/Inf/non-positive
//! inputs so a bad upstream float never panics the scorer.

use statrs::distribution::{Beta, ContinuousCDF};

fn sanitize(x: f64) -> f64 {
    if x.is_finite() && x > 0.0 {
        x
    } else {
        1.0
    }
}

/// Namespace for Beta-posterior mean/variance arithmetic.
pub struct BetaPosterior;

impl BetaPosterior {
    /// Posterior parameters for k conforming observations out of n trials:
    /// Beta(1 + k, 1 + (n - k)).
    pub fn posterior_params(k: u64, n_minus_k: u64) -> (f64, f64) {
        (1.0 + k as f64, 1.0 + n_minus_k as f64)
    }

    pub fn posterior_mean(alpha: f64, beta: f64) -> f64 {
        let a = sanitize(alpha);
        let b = sanitize(beta);
        let sum = a + b;
        if sum <= 0.0 {
            0.5
        } else {
            a / sum
        }
    }

    pub fn posterior_variance(alpha: f64, beta: f64) -> f64 {
        let a = sanitize(alpha);
        let b = sanitize(beta);
        let sum = a + b;
        if sum <= 0.0 {
            return 0.0;
        }
        (a * b) / (sum * sum * (sum + 1.0))
    }
}

/// The credible interval at the given confidence level, from the Beta
/// inverse CDF.
pub fn credible_interval(alpha: f64, beta: f64, confidence: f64) -> (f64, f64) {
    let a = sanitize(alpha);
    let b = sanitize(beta);
    let tail = ((1.0 - confidence) / 2.0).clamp(0.0, 0.5);

    match Beta::new(a, b) {
        Ok(dist) => {
            let low = dist.inverse_cdf(tail);
            let high = dist.inverse_cdf(1.0 - tail);
            (low.clamp(0.0, 1.0), high.clamp(0.0, 1.0))
        }
        Err(_) => (0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_prior_mean_is_half() {
        assert!((BetaPosterior::posterior_mean(1.0, 1.0) - 0.5).abs() < 1e-10);
    }

    #[test]
    fn nan_inputs_never_produce_nan_mean() {
        assert!(BetaPosterior::posterior_mean(f64::NAN, 1.0).is_finite());
        assert!(BetaPosterior::posterior_mean(1.0, f64::NAN).is_finite());
        assert!(BetaPosterior::posterior_mean(0.0, 0.0).is_finite());
    }

    #[test]
    fn credible_interval_narrows_with_more_data() {
        let (lo_small, hi_small) = credible_interval(5.0, 5.0, 0.95);
        let (lo_large, hi_large) = credible_interval(500.0, 500.0, 0.95);
        assert!((hi_large - lo_large) < (hi_small - lo_small));
    }
}
