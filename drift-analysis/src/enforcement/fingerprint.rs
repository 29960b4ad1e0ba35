//! Content-based violation fingerprints, stable across pure reformatting
//! of surrounding code (never line-based).

/// Fingerprint a violation from its stable identity components: the rule
/// that fired, the pattern it deviates from, and the matched text itself
/// — deliberately excluding line/column so reformatting doesn't churn it.
pub fn content_fingerprint(rule_id: &str, pattern_id: &str, matched_text: &str) -> String {
    let hash = xxhash_rust::xxh3::xxh3_64(format!("{rule_id}\0{pattern_id}\0{matched_text}").as_bytes());
    format!("{hash:016x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_across_identical_input() {
        let a = content_fingerprint("naming/camelCase", "p1", "getUserById");
        let b = content_fingerprint("naming/camelCase", "p1", "getUserById");
        assert_eq!(a, b);
    }

    #[test]
    fn differs_on_matched_text() {
        let a = content_fingerprint("naming/camelCase", "p1", "getUserById");
        let b = content_fingerprint("naming/camelCase", "p1", "get_user_by_id");
        assert_ne!(a, b);
    }
}
