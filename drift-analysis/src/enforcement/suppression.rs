//! Inline suppression: `// drift-ignore` / `// drift-ignore: <rule_id>`
//! comments on the violating line or the line immediately above it.

const SUPPRESS_MARKER: &str = "drift-ignore";

#[derive(Default)]
pub struct SuppressionChecker;

impl SuppressionChecker {
    pub fn new() -> Self {
        Self
    }

    /// `line` is 1-indexed, matching `ViolationRow::line`. `source_lines`
    /// is the full file split on `\n`.
    pub fn is_suppressed(
        &self,
        line: u32,
        rule_id: Option<&str>,
        source_lines: &[&str],
    ) -> bool {
        let idx = line.saturating_sub(1) as usize;
        [idx.checked_sub(1), Some(idx)]
            .into_iter()
            .flatten()
            .filter_map(|i| source_lines.get(i))
            .any(|text| Self::line_suppresses(text, rule_id))
    }

    fn line_suppresses(text: &str, rule_id: Option<&str>) -> bool {
        let Some(marker_pos) = text.find(SUPPRESS_MARKER) else {
            return false;
        };
        let after = text[marker_pos + SUPPRESS_MARKER.len()..].trim_start();
        match (rule_id, after.strip_prefix(':')) {
            (_, None) => true,
            (Some(id), Some(rest)) => rest.trim() == id,
            (None, Some(_)) => true,
        }
    }
}
