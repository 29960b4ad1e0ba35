//! Stable small IDs. Identifiers wrap an interned `lasso::Spur` where the
//! identity is a string (paths, qualified names, detector/pattern/module
//! tags) and a plain integer where the identity is purely positional
//! (no canonical string form).

use serde::{Deserialize, Serialize};

/// Interned file path. Equality and hashing are handle-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileId(pub lasso::Spur);

/// `(FileId, fully-qualified-name, body-hash)` identity collapsed into an
/// interned composite key — the composite string is interned once via
/// `FunctionInterner::intern_concat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionId(pub lasso::Spur);

/// Interned module/package path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleId(pub lasso::Spur);

/// Interned class/interface/struct name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassId(pub lasso::Spur);

/// Stable hash of `detector_id + pattern_body`; not an interner handle —
/// recomputed identically across runs so the same pattern converges to
/// the same ID without a process-wide snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatternId(pub u64);

impl PatternId {
    pub fn from_parts(detector_id: &str, pattern_body: &str) -> Self {
        use std::hash::{Hash, Hasher};
        let mut hasher = rustc_hash::FxHasher::default();
        detector_id.hash(&mut hasher);
        pattern_body.hash(&mut hasher);
        Self(hasher.finish())
    }
}

/// Identifier of a registered detector; stable across runs (derived from
/// its declared id, not a process-local handle).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DetectorId(pub String);

impl std::fmt::Display for DetectorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
