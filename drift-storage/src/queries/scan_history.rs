//! scan_history table queries.

use drift_core::errors::StorageError;
use rusqlite::{params, Connection};

#[derive(Debug, Clone)]
pub struct ScanHistoryRow {
    pub id: i64,
    pub started_at: i64,
    pub completed_at: Option<i64>,
    pub root_path: String,
    pub total_files: Option<i64>,
    pub added_files: Option<i64>,
    pub modified_files: Option<i64>,
    pub removed_files: Option<i64>,
    pub unchanged_files: Option<i64>,
    pub duration_ms: Option<i64>,
    pub status: String,
    pub error: Option<String>,
}

const SELECT_COLS: &str = "id, started_at, completed_at, root_path, total_files, added_files,
     modified_files, removed_files, unchanged_files, duration_ms, status, error";

pub fn insert_scan_start(
    conn: &Connection,
    started_at: i64,
    root_path: &str,
) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO scan_history (started_at, root_path, status) VALUES (?1, ?2, 'running')",
        params![started_at, root_path],
    )
    .map_err(sqe)?;
    Ok(conn.last_insert_rowid())
}

#[allow(clippy::too_many_arguments)]
pub fn update_scan_complete(
    conn: &Connection,
    id: i64,
    completed_at: i64,
    total_files: i64,
    added_files: i64,
    modified_files: i64,
    removed_files: i64,
    unchanged_files: i64,
    duration_ms: i64,
    status: &str,
    error: Option<&str>,
) -> Result<(), StorageError> {
    conn.execute(
        "UPDATE scan_history SET
            completed_at = ?2, total_files = ?3, added_files = ?4, modified_files = ?5,
            removed_files = ?6, unchanged_files = ?7, duration_ms = ?8, status = ?9, error = ?10
         WHERE id = ?1",
        params![
            id, completed_at, total_files, added_files, modified_files,
            removed_files, unchanged_files, duration_ms, status, error,
        ],
    )
    .map_err(sqe)?;
    Ok(())
}

pub fn query_recent(conn: &Connection, limit: usize) -> Result<Vec<ScanHistoryRow>, StorageError> {
    let sql = format!("SELECT {SELECT_COLS} FROM scan_history ORDER BY started_at DESC LIMIT ?1");
    let mut stmt = conn.prepare_cached(&sql).map_err(sqe)?;
    let rows = stmt.query_map(params![limit as i64], map_row).map_err(sqe)?;
    collect_rows(rows)
}

pub fn count(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM scan_history", [], |row| row.get(0)).map_err(sqe)
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ScanHistoryRow> {
    Ok(ScanHistoryRow {
        id: row.get(0)?,
        started_at: row.get(1)?,
        completed_at: row.get(2)?,
        root_path: row.get(3)?,
        total_files: row.get(4)?,
        added_files: row.get(5)?,
        modified_files: row.get(6)?,
        removed_files: row.get(7)?,
        unchanged_files: row.get(8)?,
        duration_ms: row.get(9)?,
        status: row.get(10)?,
        error: row.get(11)?,
    })
}

fn sqe(e: impl std::fmt::Display) -> StorageError {
    StorageError::SqliteError { message: e.to_string() }
}

fn collect_rows(
    rows: rusqlite::MappedRows<'_, impl FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<ScanHistoryRow>>,
) -> Result<Vec<ScanHistoryRow>, StorageError> {
    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(sqe)?);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        crate::migrations::run(&conn).unwrap();
        conn
    }

    #[test]
    fn starts_and_completes_a_scan() {
        let conn = setup();
        let id = insert_scan_start(&conn, 100, "/repo").unwrap();
        update_scan_complete(&conn, id, 200, 10, 2, 1, 0, 7, 100, "complete", None).unwrap();

        let recent = query_recent(&conn, 5).unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].status, "complete");
        assert_eq!(recent[0].total_files, Some(10));
        assert_eq!(count(&conn).unwrap(), 1);
    }
}
