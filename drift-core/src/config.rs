//! Root configuration: layered CLI > env (`DRIFT_*`) > project file >
//! user file > built-in defaults. Every section is `Option<T>`-shaped so
//! partial files merge cleanly; accessors provide the documented default.

pub mod analysis_config;
pub mod learning_config;
pub mod retention_config;
pub mod scan_config;
pub mod storage_config;

use serde::{Deserialize, Serialize};

pub use analysis_config::AnalysisConfig;
pub use learning_config::LearningConfig;
pub use retention_config::RetentionConfig;
pub use scan_config::ScanConfig;
pub use storage_config::StorageConfig;

/// Root TOML config: `[scan]`, `[analysis]`, `[storage]`, `[learning]`,
/// `[backup]` (carried as `[retention]` here — this crate owns retention
/// policy, not backup scripting, which is an external collaborator).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DriftConfig {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub learning: LearningConfig,
    #[serde(default)]
    pub retention: RetentionConfig,
}

impl DriftConfig {
    /// Parse a single TOML source. Unknown top-level keys are rejected so
    /// typos in a project config surface immediately.
    pub fn from_toml_str(input: &str) -> Result<Self, crate::errors::ConfigError> {
        toml::from_str(input).map_err(|e| crate::errors::ConfigError::MalformedToml {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Merge layers in ascending priority: defaults, user file, project
    /// file, environment, CLI. Each layer's `Some` fields override the
    /// previous layer's; `None` leaves the lower layer's value in place.
    pub fn layer(mut self, override_layer: DriftConfig) -> Self {
        self.scan = self.scan.merge(override_layer.scan);
        self.analysis = self.analysis.merge(override_layer.analysis);
        self.storage = self.storage.merge(override_layer.storage);
        self.learning = self.learning.merge(override_layer.learning);
        self.retention = self.retention.merge(override_layer.retention);
        self
    }

    /// Apply `DRIFT_*` environment overrides on top of the file-layered config.
    pub fn apply_env_overrides(mut self) -> Self {
        if let Ok(v) = std::env::var("DRIFT_SCAN_THREADS") {
            if let Ok(n) = v.parse() {
                self.scan.threads = Some(n);
            }
        }
        if let Ok(v) = std::env::var("DRIFT_SCAN_MAX_FILE_SIZE") {
            if let Ok(n) = v.parse() {
                self.scan.max_file_size = Some(n);
            }
        }
        if let Ok(v) = std::env::var("DRIFT_STORAGE_PATH") {
            self.storage.db_path = Some(v);
        }
        self
    }
}
