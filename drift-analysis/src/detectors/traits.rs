//! Shared contract every pattern detector implements, plus the category/
//! variant vocabulary the registry filters on.

use crate::engine::types::PatternMatch;
use crate::engine::visitor::DetectionContext;

/// The 16 pattern categories a detector can belong to — one-to-one with
/// `engine::types::PatternCategory`, kept as a distinct type since a
/// detector's category is a registration concern, not a match's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectorCategory {
    Api,
    Auth,
    Components,
    Config,
    Contracts,
    DataAccess,
    Documentation,
    Errors,
    Logging,
    Performance,
    Security,
    Structural,
    Styling,
    Testing,
    Types,
    Accessibility,
}

impl DetectorCategory {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Auth => "auth",
            Self::Components => "components",
            Self::Config => "config",
            Self::Contracts => "contracts",
            Self::DataAccess => "data_access",
            Self::Documentation => "documentation",
            Self::Errors => "errors",
            Self::Logging => "logging",
            Self::Performance => "performance",
            Self::Security => "security",
            Self::Structural => "structural",
            Self::Styling => "styling",
            Self::Testing => "testing",
            Self::Types => "types",
            Self::Accessibility => "accessibility",
        }
    }
}

impl std::fmt::Display for DetectorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a detector is a full implementation or a placeholder that
/// matches the shallow, high-confidence subset of its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectorVariant {
    /// The one always-registered detector for a category.
    Base,
    /// A narrow, focused detector layered on top of `Base` for one
    /// specific convention (e.g. a single framework's idiom).
    Specialized(&'static str),
}

/// Contract every pattern detector implements. `DetectorRegistry` holds
/// these as trait objects and dispatches `detect` per file.
pub trait Detector: Send + Sync {
    /// Stable identifier, e.g. `"security-base"`. Used for enable/disable.
    fn id(&self) -> &str;

    /// Which of the 16 categories this detector belongs to.
    fn category(&self) -> DetectorCategory;

    /// Base vs specialized — lets the registry report category coverage.
    fn variant(&self) -> DetectorVariant;

    /// Critical detectors still run under `--critical-only`.
    fn is_critical(&self) -> bool {
        false
    }

    /// Run this detector against a single file's context, returning any
    /// matches found. Must not panic on malformed input — the registry
    /// catches panics defensively, but a well-behaved detector returns an
    /// empty vec instead of unwinding.
    fn detect(&self, ctx: &DetectionContext) -> Vec<PatternMatch>;
}
