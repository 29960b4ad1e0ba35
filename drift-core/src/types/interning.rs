//! Concurrent build-time interners, sealed to a read-only snapshot.
//!
//! Two domain wrappers over `lasso`: one that normalizes path separators
//! before interning (`PathInterner`), and one that supports
//! intern-by-concat for qualified symbol names built from several parts
//! without an intermediate heap `String` per call (`FunctionInterner`).

use lasso::{Spur, ThreadedRodeo};

use super::identifiers::{FileId, FunctionId};

/// Interner for filesystem paths. Normalizes `\` to `/` before interning
/// so Windows and Unix scans of the same tree produce identical handles.
#[derive(Default)]
pub struct PathInterner {
    rodeo: ThreadedRodeo,
}

impl PathInterner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&self, path: &str) -> FileId {
        if path.contains('\\') {
            FileId(self.rodeo.get_or_intern(path.replace('\\', "/")))
        } else {
            FileId(self.rodeo.get_or_intern(path))
        }
    }

    pub fn resolve(&self, id: FileId) -> &str {
        self.rodeo.resolve(&id.0)
    }

    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }
}

/// Interner for function identities. Supports interning a composite key
/// built from `(file, qualified_name, body_hash)` parts without
/// allocating an intermediate owned string per call site when the parts
/// are already borrowed.
#[derive(Default)]
pub struct FunctionInterner {
    rodeo: ThreadedRodeo,
}

impl FunctionInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `file_path#qualified_name#body_hash` as a single composite key.
    pub fn intern_concat(&self, file_path: &str, qualified_name: &str, body_hash: u64) -> FunctionId {
        let key = format!("{file_path}#{qualified_name}#{body_hash:016x}");
        FunctionId(self.rodeo.get_or_intern(key))
    }

    pub fn resolve(&self, id: FunctionId) -> &str {
        self.rodeo.resolve(&id.0)
    }

    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }
}

/// A frozen, read-only view of an interner taken at query time. Built
/// from `ThreadedRodeo::into_reader()`-style snapshotting; callers past
/// this point never mutate the pool.
pub struct InternerSnapshot {
    keys: std::collections::HashMap<Spur, String>,
}

impl InternerSnapshot {
    pub fn from_path_interner(interner: &PathInterner) -> Self {
        let keys = interner
            .rodeo
            .strings()
            .map(|s| (interner.rodeo.get_or_intern(s), s.to_string()))
            .collect();
        Self { keys }
    }

    pub fn get(&self, spur: Spur) -> Option<&str> {
        self.keys.get(&spur).map(String::as_str)
    }
}
