//! functions table queries.

use drift_core::errors::StorageError;
use rusqlite::{params, Connection};

#[derive(Debug, Clone)]
pub struct FunctionRecord {
    pub id: i64,
    pub file: String,
    pub name: String,
    pub qualified_name: Option<String>,
    pub language: String,
    pub line: i64,
    pub end_line: i64,
    pub parameter_count: i64,
    pub return_type: Option<String>,
    pub is_exported: bool,
    pub is_async: bool,
    pub body_hash: Option<Vec<u8>>,
    pub signature_hash: Option<Vec<u8>>,
}

const SELECT_COLS: &str = "id, file, name, qualified_name, language, line, end_line,
     parameter_count, return_type, is_exported, is_async, body_hash, signature_hash";

pub fn get_functions_by_file(
    conn: &Connection,
    file: &str,
) -> Result<Vec<FunctionRecord>, StorageError> {
    let sql = format!("SELECT {SELECT_COLS} FROM functions WHERE file = ?1 ORDER BY line");
    let mut stmt = conn.prepare_cached(&sql).map_err(sqe)?;
    let rows = stmt.query_map(params![file], map_row).map_err(sqe)?;
    collect_rows(rows)
}

pub fn get_function_by_qualified_name(
    conn: &Connection,
    qualified_name: &str,
) -> Result<Option<FunctionRecord>, StorageError> {
    let sql = format!("SELECT {SELECT_COLS} FROM functions WHERE qualified_name = ?1");
    let mut stmt = conn.prepare_cached(&sql).map_err(sqe)?;
    match stmt.query_row(params![qualified_name], map_row) {
        Ok(r) => Ok(Some(r)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(sqe(e)),
    }
}

pub fn delete_functions_by_file(conn: &Connection, file: &str) -> Result<usize, StorageError> {
    conn.execute("DELETE FROM functions WHERE file = ?1", params![file]).map_err(sqe)
}

pub fn count_functions(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM functions", [], |row| row.get(0)).map_err(sqe)
}

/// Entry points: functions with no incoming call edges.
pub fn count_entry_points(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row(
        "SELECT COUNT(*) FROM functions f
         WHERE NOT EXISTS (SELECT 1 FROM call_edges e WHERE e.callee_id = f.id)",
        [],
        |row| row.get(0),
    )
    .map_err(sqe)
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<FunctionRecord> {
    Ok(FunctionRecord {
        id: row.get(0)?,
        file: row.get(1)?,
        name: row.get(2)?,
        qualified_name: row.get(3)?,
        language: row.get(4)?,
        line: row.get(5)?,
        end_line: row.get(6)?,
        parameter_count: row.get(7)?,
        return_type: row.get(8)?,
        is_exported: row.get(9)?,
        is_async: row.get(10)?,
        body_hash: row.get(11)?,
        signature_hash: row.get(12)?,
    })
}

fn sqe(e: impl std::fmt::Display) -> StorageError {
    StorageError::SqliteError { message: e.to_string() }
}

fn collect_rows(
    rows: rusqlite::MappedRows<'_, impl FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<FunctionRecord>>,
) -> Result<Vec<FunctionRecord>, StorageError> {
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
        conn
    }

    #[test]
    fn finds_entry_points_with_no_incoming_edges() {
        let conn = setup();
        conn.execute(
            "INSERT INTO functions (id, file, name, qualified_name, language, line, end_line, parameter_count, return_type, is_exported, is_async)
             VALUES (1, 'a.rs', 'main', 'a::main', 'rust', 1, 5, 0, NULL, 1, 0),
                    (2, 'a.rs', 'helper', 'a::helper', 'rust', 7, 9, 0, NULL, 0, 0)",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO call_edges (caller_id, callee_id, resolution, confidence, call_site_line)
             VALUES (1, 2, 'exact', 1.0, 2)",
            [],
        )
        .unwrap();

        assert_eq!(count_functions(&conn).unwrap(), 2);
        assert_eq!(count_entry_points(&conn).unwrap(), 1);

        let found = get_function_by_qualified_name(&conn, "a::main").unwrap().unwrap();
        assert_eq!(found.name, "main");
        assert!(get_function_by_qualified_name(&conn, "a::missing").unwrap().is_none());

        delete_functions_by_file(&conn, "a.rs").unwrap();
        assert_eq!(count_functions(&conn).unwrap(), 0);
    }
}
