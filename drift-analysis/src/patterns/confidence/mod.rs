//! Beta-posterior confidence scoring (§4.10): five-factor model, momentum
//! tracking, temporal decay, and graduated tiers.

pub mod beta;
pub mod factors;
pub mod momentum;
pub mod scorer;
pub mod types;

pub use scorer::{ConfidenceScorer, FeedbackStore, ScorerConfig};
pub use types::{ConfidenceScore, ConfidenceTier, MomentumDirection};
