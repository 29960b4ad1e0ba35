//! call_edges table queries.

use drift_core::errors::StorageError;
use rusqlite::{params, Connection};

#[derive(Debug, Clone)]
pub struct CallEdgeRecord {
    pub caller_id: i64,
    pub callee_id: i64,
    pub resolution: String,
    pub confidence: f64,
    pub call_site_line: i64,
}

const SELECT_COLS: &str = "caller_id, callee_id, resolution, confidence, call_site_line";

pub fn insert_call_edges(
    conn: &Connection,
    edges: &[CallEdgeRecord],
) -> Result<usize, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT OR IGNORE INTO call_edges (caller_id, callee_id, resolution, confidence, call_site_line)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .map_err(sqe)?;

    let mut count = 0;
    for e in edges {
        stmt.execute(params![e.caller_id, e.callee_id, e.resolution, e.confidence, e.call_site_line])
            .map_err(sqe)?;
        count += 1;
    }
    Ok(count)
}

pub fn get_edges_by_caller(
    conn: &Connection,
    caller_id: i64,
) -> Result<Vec<CallEdgeRecord>, StorageError> {
    let sql = format!("SELECT {SELECT_COLS} FROM call_edges WHERE caller_id = ?1");
    let mut stmt = conn.prepare_cached(&sql).map_err(sqe)?;
    let rows = stmt.query_map(params![caller_id], map_row).map_err(sqe)?;
    collect_rows(rows)
}

pub fn get_edges_by_callee(
    conn: &Connection,
    callee_id: i64,
) -> Result<Vec<CallEdgeRecord>, StorageError> {
    let sql = format!("SELECT {SELECT_COLS} FROM call_edges WHERE callee_id = ?1");
    let mut stmt = conn.prepare_cached(&sql).map_err(sqe)?;
    let rows = stmt.query_map(params![callee_id], map_row).map_err(sqe)?;
    collect_rows(rows)
}

pub fn delete_edges_by_file(conn: &Connection, file: &str) -> Result<usize, StorageError> {
    conn.execute(
        "DELETE FROM call_edges WHERE caller_id IN (SELECT id FROM functions WHERE file = ?1)
            OR callee_id IN (SELECT id FROM functions WHERE file = ?1)",
        params![file],
    )
    .map_err(sqe)
}

pub fn count_call_edges(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM call_edges", [], |row| row.get(0)).map_err(sqe)
}

pub fn count_resolved_edges(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row(
        "SELECT COUNT(*) FROM call_edges WHERE resolution != 'fuzzy'",
        [],
        |row| row.get(0),
    )
    .map_err(sqe)
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CallEdgeRecord> {
    Ok(CallEdgeRecord {
        caller_id: row.get(0)?,
        callee_id: row.get(1)?,
        resolution: row.get(2)?,
        confidence: row.get(3)?,
        call_site_line: row.get(4)?,
    })
}

fn sqe(e: impl std::fmt::Display) -> StorageError {
    StorageError::SqliteError { message: e.to_string() }
}

fn collect_rows(
    rows: rusqlite::MappedRows<'_, impl FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<CallEdgeRecord>>,
) -> Result<Vec<CallEdgeRecord>, StorageError> {
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
        conn.execute(
            "INSERT INTO file_metadata (path, file_size, content_hash, mtime_secs, mtime_nanos, last_scanned_at)
             VALUES ('a.rs', 1, x'00', 0, 0, 0)",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO functions (id, file, name, language, line, end_line, parameter_count, is_exported, is_async)
             VALUES (1, 'a.rs', 'caller', 'rust', 1, 2, 0, 1, 0),
                    (2, 'a.rs', 'callee', 'rust', 4, 5, 0, 0, 0)",
            [],
        )
        .unwrap();
        conn
    }

    #[test]
    fn inserts_and_counts_resolved_edges() {
        let conn = setup();
        insert_call_edges(
            &conn,
            &[
                CallEdgeRecord { caller_id: 1, callee_id: 2, resolution: "exact".into(), confidence: 1.0, call_site_line: 1 },
                CallEdgeRecord { caller_id: 1, callee_id: 2, resolution: "fuzzy".into(), confidence: 0.4, call_site_line: 2 },
            ],
        )
        .unwrap();

        assert_eq!(count_call_edges(&conn).unwrap(), 2);
        assert_eq!(count_resolved_edges(&conn).unwrap(), 1);
        assert_eq!(get_edges_by_caller(&conn, 1).unwrap().len(), 2);
        assert_eq!(get_edges_by_callee(&conn, 2).unwrap().len(), 2);

        delete_edges_by_file(&conn, "a.rs").unwrap();
        assert_eq!(count_call_edges(&conn).unwrap(), 0);
    }
}
