//! parse_cache table queries.

use drift_core::errors::StorageError;
use rusqlite::{params, Connection};

#[derive(Debug, Clone)]
pub struct ParseCacheRecord {
    pub content_hash: Vec<u8>,
    pub language: String,
    pub parse_result_json: String,
    pub created_at: i64,
}

pub fn get_by_hash(
    conn: &Connection,
    content_hash: &[u8],
) -> Result<Option<ParseCacheRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT content_hash, language, parse_result_json, created_at
             FROM parse_cache WHERE content_hash = ?1",
        )
        .map_err(sqe)?;

    match stmt.query_row(params![content_hash], map_row) {
        Ok(r) => Ok(Some(r)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(sqe(e)),
    }
}

pub fn insert(
    conn: &Connection,
    content_hash: &[u8],
    language: &str,
    parse_result_json: &str,
    created_at: i64,
) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO parse_cache (content_hash, language, parse_result_json, created_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(content_hash) DO UPDATE SET
            language = excluded.language,
            parse_result_json = excluded.parse_result_json,
            created_at = excluded.created_at",
        params![content_hash, language, parse_result_json, created_at],
    )
    .map_err(sqe)?;
    Ok(())
}

pub fn invalidate(conn: &Connection, content_hash: &[u8]) -> Result<(), StorageError> {
    conn.execute("DELETE FROM parse_cache WHERE content_hash = ?1", params![content_hash])
        .map_err(sqe)?;
    Ok(())
}

pub fn count(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM parse_cache", [], |row| row.get(0)).map_err(sqe)
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ParseCacheRecord> {
    Ok(ParseCacheRecord {
        content_hash: row.get(0)?,
        language: row.get(1)?,
        parse_result_json: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn sqe(e: impl std::fmt::Display) -> StorageError {
    StorageError::SqliteError { message: e.to_string() }
}
