//! Shared types for the outlier detection ensemble (§4.11).

/// Which statistical (or rule-based) method flagged a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutlierMethod {
    ZScore,
    Grubbs,
    GeneralizedEsd,
    Iqr,
    Mad,
    RuleBased,
}

/// A normalized deviation score in `[0, 1]`, comparable across methods.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct DeviationScore(f64);

impl DeviationScore {
    pub fn new(value: f64) -> Self {
        let clamped = if value.is_finite() { value.clamp(0.0, 1.0) } else { 0.0 };
        Self(clamped)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Significance tier, derived from the deviation score: Critical ≥0.90,
/// High ≥0.75, Moderate ≥0.55, Low otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignificanceTier {
    Critical,
    High,
    Moderate,
    Low,
}

impl SignificanceTier {
    pub fn from_deviation(deviation: f64) -> Self {
        if deviation >= 0.90 {
            Self::Critical
        } else if deviation >= 0.75 {
            Self::High
        } else if deviation >= 0.55 {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

/// One flagged value.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierResult {
    pub index: usize,
    pub value: f64,
    pub test_statistic: f64,
    pub deviation_score: DeviationScore,
    pub significance: SignificanceTier,
    pub method: OutlierMethod,
    pub is_outlier: bool,
}

/// Tunables for the ensemble, matching the auto-selection bands in §4.11.
#[derive(Debug, Clone, Copy)]
pub struct OutlierConfig {
    pub min_sample_size: usize,
    pub z_threshold: f64,
    pub max_iterations: u32,
    pub alpha: f64,
    pub iqr_multiplier: f64,
    pub mad_threshold: f64,
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self {
            min_sample_size: 10,
            z_threshold: 2.5,
            max_iterations: 3,
            alpha: 0.05,
            iqr_multiplier: 1.5,
            mad_threshold: 3.5,
        }
    }
}
