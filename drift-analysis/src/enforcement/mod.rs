//! Outlier-to-violation conversion (§4.11) and violation fingerprinting.
//!
//! Gate/policy aggregation and CI-gate exit-code mapping are an external
//! collaborator's concern (see spec §1); this module stops at producing
//! the `Violation` records the store persists.

pub mod fingerprint;
pub mod suppression;
pub mod violations;

pub use fingerprint::content_fingerprint;
pub use suppression::SuppressionChecker;
pub use violations::{RulesEvaluator, RulesInput, Violation, ViolationSeverity};
