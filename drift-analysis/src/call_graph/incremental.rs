//! Incremental call-graph updates: re-running `CallGraphBuilder` on an
//! entire codebase after a handful of files changed wastes work the
//! scanner already avoided by caching parse results. `IncrementalCallGraph`
//! diffs per-file function sets by hash and only rebuilds what moved.

use drift_core::types::collections::{FxHashMap, FxHashSet};

use crate::parsers::types::ParseResult;

use super::builder::CallGraphBuilder;
use super::types::{CallGraph, CallGraphStats};

/// A function's identity for diffing: same name and file is the same
/// function; differing signature/body hashes mean it changed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FunctionKey {
    file: String,
    name: String,
}

#[derive(Debug, Clone)]
struct FunctionFingerprint {
    signature_hash: u64,
    body_hash: u64,
}

/// Tracks the last-built graph plus a fingerprint of every function in it,
/// so a subsequent `update` can tell whether a full rebuild is actually
/// necessary.
pub struct IncrementalCallGraph {
    builder: CallGraphBuilder,
    fingerprints: FxHashMap<FunctionKey, FunctionFingerprint>,
}

impl IncrementalCallGraph {
    pub fn new(builder: CallGraphBuilder) -> Self {
        Self {
            builder,
            fingerprints: FxHashMap::default(),
        }
    }

    /// Build from scratch and remember the resulting fingerprints.
    pub fn build(&mut self, parse_results: &[ParseResult]) -> Result<(CallGraph, CallGraphStats), drift_core::errors::CallGraphError> {
        self.fingerprints = fingerprints_of(parse_results);
        self.builder.build(parse_results)
    }

    /// True if any function's signature or body hash changed, or any
    /// function was added/removed, relative to the last `build`/`update`.
    pub fn has_changed(&self, parse_results: &[ParseResult]) -> bool {
        let current = fingerprints_of(parse_results);
        if current.len() != self.fingerprints.len() {
            return true;
        }
        current.iter().any(|(key, fp)| {
            self.fingerprints.get(key).map_or(true, |prev| {
                prev.signature_hash != fp.signature_hash || prev.body_hash != fp.body_hash
            })
        })
    }

    /// Rebuild only if something changed; otherwise return `None` and let
    /// the caller keep using its existing graph.
    pub fn update(
        &mut self,
        parse_results: &[ParseResult],
    ) -> Result<Option<(CallGraph, CallGraphStats)>, drift_core::errors::CallGraphError> {
        if !self.has_changed(parse_results) {
            return Ok(None);
        }
        self.build(parse_results).map(Some)
    }

    /// Files whose function fingerprints differ from the last build.
    pub fn changed_files(&self, parse_results: &[ParseResult]) -> FxHashSet<String> {
        let current = fingerprints_of(parse_results);
        let mut changed = FxHashSet::default();
        for (key, fp) in &current {
            let is_new_or_changed = self.fingerprints.get(key).map_or(true, |prev| {
                prev.signature_hash != fp.signature_hash || prev.body_hash != fp.body_hash
            });
            if is_new_or_changed {
                changed.insert(key.file.clone());
            }
        }
        for key in self.fingerprints.keys() {
            if !current.contains_key(key) {
                changed.insert(key.file.clone());
            }
        }
        changed
    }
}

fn fingerprints_of(parse_results: &[ParseResult]) -> FxHashMap<FunctionKey, FunctionFingerprint> {
    let mut out = FxHashMap::default();
    for pr in parse_results {
        for f in &pr.functions {
            let name = match &f.class_name {
                Some(class) => format!("{class}.{}", f.name),
                None => f.name.clone(),
            };
            out.insert(
                FunctionKey { file: pr.file.clone(), name },
                FunctionFingerprint {
                    signature_hash: super::builder::signature_hash(f),
                    body_hash: super::builder::body_hash(f, pr),
                },
            );
        }
    }
    out
}
