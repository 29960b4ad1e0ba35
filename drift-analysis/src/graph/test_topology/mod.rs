//! Test-to-source coverage mapping: which production functions each test
//! reaches, smells in that mapping, and coverage quality scoring.

pub mod coverage;
pub mod quality_scorer;
pub mod smells;
pub mod types;

pub use coverage::compute_coverage;
pub use quality_scorer::{minimal_test_set, score_coverage, CoverageQuality};
pub use smells::{find_smells, TestSmell, TestSmellKind, GOD_TEST_THRESHOLD};
pub use types::CoverageMapping;
