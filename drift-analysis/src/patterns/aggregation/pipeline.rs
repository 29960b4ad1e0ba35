//! Step 1 of the pattern intelligence pipeline: group raw matches by pattern
//! id, dedupe locations, and compute per-pattern confidence statistics.

use std::collections::HashSet;

use xxhash_rust::xxh3::xxh3_64;

use crate::engine::types::PatternMatch;

use super::types::{AggregatedPattern, AggregationConfig, PatternLocation};

#[derive(Debug)]
pub struct AggregationResult {
    pub patterns: Vec<AggregatedPattern>,
}

pub struct AggregationPipeline {
    config: AggregationConfig,
}

impl AggregationPipeline {
    pub fn new(config: AggregationConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(AggregationConfig::default())
    }

    pub fn run(&mut self, matches: &[PatternMatch]) -> AggregationResult {
        use std::collections::HashMap;

        let mut by_pattern: HashMap<&str, Vec<&PatternMatch>> = HashMap::new();
        for m in matches {
            by_pattern.entry(m.pattern_id.as_str()).or_default().push(m);
        }

        let mut patterns = Vec::with_capacity(by_pattern.len());
        for (pattern_id, group) in by_pattern {
            let mut seen = HashSet::new();
            let mut locations = Vec::new();
            let mut files = HashSet::new();

            for m in &group {
                if !seen.insert((m.file.as_str(), m.line, m.column)) {
                    continue;
                }
                files.insert(m.file.as_str());
                locations.push(PatternLocation {
                    file: m.file.clone(),
                    line: m.line,
                    column: m.column,
                    confidence: m.confidence,
                    is_outlier: false,
                    matched_text: Some(m.matched_text.clone()),
                });
            }

            locations.truncate(self.config.max_locations_per_pattern);

            let confidence_values: Vec<f64> = {
                let mut values: Vec<f64> = locations.iter().map(|l| l.confidence as f64).collect();
                values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                values
            };
            let mean = mean(&confidence_values);
            let stddev = stddev(&confidence_values, mean);

            let hash_input: String =
                locations.iter().map(|l| format!("{}:{};", l.file, l.line)).collect();

            patterns.push(AggregatedPattern {
                pattern_id: pattern_id.to_string(),
                category: group[0].category,
                location_count: locations.len() as u32,
                outlier_count: 0,
                file_spread: files.len() as u32,
                hierarchy: None,
                locations,
                aliases: Vec::new(),
                merged_from: Vec::new(),
                confidence_mean: mean,
                confidence_stddev: stddev,
                confidence_values,
                is_dirty: true,
                location_hash: xxh3_64(hash_input.as_bytes()),
            });
        }

        AggregationResult { patterns }
    }
}

impl Default for AggregationPipeline {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn stddev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::{DetectionMethod, PatternCategory};
    use smallvec::SmallVec;

    fn sample_match(pattern_id: &str, file: &str, line: u32, confidence: f32) -> PatternMatch {
        PatternMatch {
            file: file.to_string(),
            line,
            column: 0,
            pattern_id: pattern_id.to_string(),
            confidence,
            cwe_ids: SmallVec::new(),
            owasp: None,
            detection_method: DetectionMethod::AstVisitor,
            category: PatternCategory::Structural,
            matched_text: "x".to_string(),
        }
    }

    #[test]
    fn groups_matches_by_pattern_id() {
        let matches = vec![
            sample_match("p1", "a.rs", 1, 0.9),
            sample_match("p1", "b.rs", 2, 0.8),
            sample_match("p2", "a.rs", 3, 0.5),
        ];
        let mut pipeline = AggregationPipeline::with_defaults();
        let result = pipeline.run(&matches);
        assert_eq!(result.patterns.len(), 2);
        let p1 = result.patterns.iter().find(|p| p.pattern_id == "p1").unwrap();
        assert_eq!(p1.location_count, 2);
        assert_eq!(p1.file_spread, 2);
    }

    #[test]
    fn deduplicates_identical_locations() {
        let matches = vec![
            sample_match("p1", "a.rs", 1, 0.9),
            sample_match("p1", "a.rs", 1, 0.9),
        ];
        let mut pipeline = AggregationPipeline::with_defaults();
        let result = pipeline.run(&matches);
        assert_eq!(result.patterns[0].location_count, 1);
    }
}
