//! Call-site resolution chain: same-file, method-call, import-based,
//! export-based, then a last-resort fuzzy name match. DI injection is
//! resolved separately by `di_support` as a fallback from the builder.

use drift_core::types::collections::FxHashMap;

use crate::parsers::types::{CallSite, ImportInfo};

use super::types::Resolution;

/// Resolve a single call site to a callee's `file::name` key.
///
/// Tries, in order: same-file match, receiver-qualified method match,
/// import-based cross-file match, single-exported-symbol match, and
/// finally an unqualified fuzzy name match. Returns `None` when the
/// callee name doesn't appear anywhere in the indices, or the match is
/// too ambiguous to even fuzzy-resolve (more than one same-file hit).
#[allow(clippy::too_many_arguments)]
pub fn resolve_call(
    call_site: &CallSite,
    file: &str,
    _caller_language: &str,
    imports: &[ImportInfo],
    name_index: &FxHashMap<String, Vec<String>>,
    qualified_index: &FxHashMap<String, String>,
    export_index: &FxHashMap<String, Vec<String>>,
    _language_index: &FxHashMap<String, String>,
) -> Option<(String, Resolution)> {
    let candidates = name_index.get(&call_site.callee_name)?;
    if candidates.is_empty() {
        return None;
    }

    let same_file_prefix = format!("{file}::");
    let same_file: Vec<&String> = candidates.iter().filter(|k| k.starts_with(&same_file_prefix)).collect();

    if let Some(receiver) = &call_site.receiver {
        // Method call: `receiver.method()`. Prefer a same-file class-method
        // node (`File::Class.method`) over a bare free-function match.
        let method_form = format!(".{}", call_site.callee_name);
        if let Some(key) = same_file.iter().find(|k| k.ends_with(&method_form)) {
            return Some(((*key).clone(), Resolution::MethodCall));
        }
        if let Some(key) = candidates.iter().find(|k| k.ends_with(&method_form)) {
            return Some((key.clone(), Resolution::MethodCall));
        }
        let _ = receiver; // receiver text itself isn't resolvable without a type system
    }

    if same_file.len() == 1 {
        return Some((same_file[0].clone(), Resolution::SameFile));
    }

    // Import-based: the callee name was brought in via an import statement.
    // We can't resolve the import's *target file* without a module graph,
    // so we fall back to the qualified index keyed by the imported name.
    let imported = imports.iter().any(|imp| {
        imp.specifiers.iter().any(|s| {
            s.local_name == call_site.callee_name || s.imported_name == call_site.callee_name
        })
    });
    if imported {
        if let Some(key) = qualified_index.get(&call_site.callee_name) {
            return Some((key.clone(), Resolution::ImportBased));
        }
        if candidates.len() == 1 {
            return Some((candidates[0].clone(), Resolution::ImportBased));
        }
    }

    if let Some(exported) = export_index.get(&call_site.callee_name) {
        if exported.len() == 1 {
            return Some((exported[0].clone(), Resolution::ExportBased));
        }
    }

    if candidates.len() == 1 {
        return Some((candidates[0].clone(), Resolution::Fuzzy));
    }

    None
}

/// Tracks per-language resolution outcomes so the builder can warn when a
/// language's calls are resolving poorly (usually a sign the parser isn't
/// populating call sites correctly for that grammar).
#[derive(Debug, Default)]
pub struct ResolutionDiagnostics {
    attempted: FxHashMap<String, usize>,
    resolved: FxHashMap<String, usize>,
}

impl ResolutionDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, resolution: Option<&Resolution>, caller_language: &str) {
        *self.attempted.entry(caller_language.to_string()).or_default() += 1;
        if resolution.is_some() {
            *self.resolved.entry(caller_language.to_string()).or_default() += 1;
        }
    }

    /// Languages with at least 20 call-site attempts and a resolution rate
    /// below 30%, formatted as human-readable warnings.
    pub fn low_resolution_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        for (lang, &attempted) in &self.attempted {
            if attempted < 20 {
                continue;
            }
            let resolved = self.resolved.get(lang).copied().unwrap_or(0);
            let rate = resolved as f64 / attempted as f64;
            if rate < 0.30 {
                warnings.push(format!(
                    "call graph: {lang} resolved only {resolved}/{attempted} call sites ({:.0}%)",
                    rate * 100.0
                ));
            }
        }
        warnings.sort();
        warnings
    }
}
