//! Keyset `(sort_col, id)` cursor helpers (§4.2). List queries never use
//! `OFFSET` — every reader keeps paginating by carrying the last row's
//! sort key and id forward as the next page's lower bound.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};

/// Opaque pagination cursor over a `(sort_value, id)` pair. Encoded as a
/// base64 string so callers can round-trip it without parsing internals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cursor {
    pub sort_value: String,
    pub id: i64,
}

impl Cursor {
    pub fn new(sort_value: impl Into<String>, id: i64) -> Self {
        Self { sort_value: sort_value.into(), id }
    }

    /// Encode as an opaque token for API responses.
    pub fn encode(&self) -> String {
        let json = serde_json::to_string(self).expect("Cursor always serializes");
        URL_SAFE_NO_PAD.encode(json.as_bytes())
    }

    /// Decode a token produced by `encode`. Returns `None` on any malformed input
    /// rather than erroring — callers treat an invalid cursor as "start from page 1".
    pub fn decode(token: &str) -> Option<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(token.as_bytes()).ok()?;
        let json = String::from_utf8(bytes).ok()?;
        serde_json::from_str(&json).ok()
    }
}

/// A page of keyset-paginated results, with an optional cursor for the next page.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<Cursor>,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self { items: Vec::new(), next_cursor: None }
    }
}

/// Build a page from a result set fetched with `limit + 1` rows, trimming the
/// lookahead row and deriving the next cursor from it. `key` extracts the
/// `(sort_value, id)` pair a caller's query orders by.
pub fn paginate<T>(mut rows: Vec<T>, limit: usize, key: impl Fn(&T) -> (String, i64)) -> Page<T> {
    if rows.len() > limit {
        let lookahead = rows.split_off(limit);
        let next_cursor = lookahead.first().map(|row| {
            let (sort_value, id) = key(row);
            Cursor::new(sort_value, id)
        });
        Page { items: rows, next_cursor }
    } else {
        Page { items: rows, next_cursor: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_cursor_through_encode_decode() {
        let cursor = Cursor::new("camelCase", 42);
        let token = cursor.encode();
        assert_eq!(Cursor::decode(&token), Some(cursor));
    }

    #[test]
    fn decode_rejects_garbage_tokens() {
        assert_eq!(Cursor::decode("not a valid token!!"), None);
    }

    #[test]
    fn paginate_trims_lookahead_row_and_sets_next_cursor() {
        let rows = vec![("a".to_string(), 1i64), ("b".to_string(), 2), ("c".to_string(), 3)];
        let page = paginate(rows, 2, |(s, id)| (s.clone(), *id));
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.next_cursor, Some(Cursor::new("c", 3)));
    }

    #[test]
    fn paginate_returns_no_cursor_on_last_page() {
        let rows = vec![("a".to_string(), 1i64)];
        let page = paginate(rows, 5, |(s, id)| (s.clone(), *id));
        assert_eq!(page.items.len(), 1);
        assert!(page.next_cursor.is_none());
    }
}
