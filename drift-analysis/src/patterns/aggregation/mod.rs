//! Pattern aggregation: group raw matches into project-level patterns,
//! dedupe locations, and prepare merge candidates (§4.9).

pub mod pipeline;
pub mod types;

pub use pipeline::{AggregationPipeline, AggregationResult};
pub use types::{
    AggregatedPattern, AggregationConfig, MergeCandidate, MergeDecision, PatternHierarchy,
    PatternLocation,
};
