//! L3 invalidation rule (§4.12): re-learn fully once more than 10% of files
//! have changed since the last learn pass; otherwise incremental.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LearningMode {
    Full,
    Incremental,
}

pub fn determine_mode(changed_files: u64, total_files: u64, threshold: f64) -> LearningMode {
    if total_files == 0 {
        return LearningMode::Full;
    }
    let ratio = changed_files as f64 / total_files as f64;
    if ratio > threshold {
        LearningMode::Full
    } else {
        LearningMode::Incremental
    }
}
