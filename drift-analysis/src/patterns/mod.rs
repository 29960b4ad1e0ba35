//! Pattern intelligence: aggregation, Bayesian confidence, outlier
//! detection, and convention learning (§4.9-§4.12).

pub mod aggregation;
pub mod confidence;
pub mod learning;
pub mod outliers;
pub mod pipeline;

pub use pipeline::{PatternIntelligencePipeline, PipelineResult};
