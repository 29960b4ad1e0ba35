//! boundaries table queries.

use drift_core::errors::StorageError;
use rusqlite::{params, Connection};

#[derive(Debug, Clone)]
pub struct BoundaryRecord {
    pub id: i64,
    pub file: String,
    pub framework: String,
    pub model_name: String,
    pub table_name: Option<String>,
    pub field_name: Option<String>,
    pub operation: String,
    pub sensitivity: Option<String>,
    pub confidence: f64,
    pub created_at: i64,
}

const SELECT_COLS: &str =
    "id, file, framework, model_name, table_name, field_name, operation, sensitivity, confidence, created_at";

pub fn insert_boundaries(
    conn: &Connection,
    boundaries: &[BoundaryRecord],
) -> Result<usize, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO boundaries
             (file, framework, model_name, table_name, field_name, operation, sensitivity, confidence)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .map_err(sqe)?;

    let mut count = 0;
    for b in boundaries {
        stmt.execute(params![
            b.file, b.framework, b.model_name, b.table_name, b.field_name, b.operation, b.sensitivity, b.confidence,
        ])
        .map_err(sqe)?;
        count += 1;
    }
    Ok(count)
}

/// Rows whose operation is `Write` or `Delete` — the access points a data-
/// mutation audit cares about, as opposed to read-only boundaries.
pub fn get_mutating_boundaries(conn: &Connection) -> Result<Vec<BoundaryRecord>, StorageError> {
    let sql = format!("SELECT {SELECT_COLS} FROM boundaries WHERE operation IN ('write', 'delete')");
    let mut stmt = conn.prepare_cached(&sql).map_err(sqe)?;
    let rows = stmt.query_map([], map_row).map_err(sqe)?;
    collect_rows(rows)
}

pub fn get_boundaries_by_file(
    conn: &Connection,
    file: &str,
) -> Result<Vec<BoundaryRecord>, StorageError> {
    let sql = format!("SELECT {SELECT_COLS} FROM boundaries WHERE file = ?1");
    let mut stmt = conn.prepare_cached(&sql).map_err(sqe)?;
    let rows = stmt.query_map(params![file], map_row).map_err(sqe)?;
    collect_rows(rows)
}

pub fn get_boundaries_by_framework(
    conn: &Connection,
    framework: &str,
) -> Result<Vec<BoundaryRecord>, StorageError> {
    let sql = format!("SELECT {SELECT_COLS} FROM boundaries WHERE framework = ?1");
    let mut stmt = conn.prepare_cached(&sql).map_err(sqe)?;
    let rows = stmt.query_map(params![framework], map_row).map_err(sqe)?;
    collect_rows(rows)
}

pub fn get_sensitive_boundaries(conn: &Connection) -> Result<Vec<BoundaryRecord>, StorageError> {
    let sql = format!("SELECT {SELECT_COLS} FROM boundaries WHERE sensitivity IS NOT NULL");
    let mut stmt = conn.prepare_cached(&sql).map_err(sqe)?;
    let rows = stmt.query_map([], map_row).map_err(sqe)?;
    collect_rows(rows)
}

pub fn delete_boundaries_by_file(conn: &Connection, file: &str) -> Result<usize, StorageError> {
    conn.execute("DELETE FROM boundaries WHERE file = ?1", params![file]).map_err(sqe)
}

pub fn count_boundaries(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM boundaries", [], |row| row.get(0)).map_err(sqe)
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<BoundaryRecord> {
    Ok(BoundaryRecord {
        id: row.get(0)?,
        file: row.get(1)?,
        framework: row.get(2)?,
        model_name: row.get(3)?,
        table_name: row.get(4)?,
        field_name: row.get(5)?,
        operation: row.get(6)?,
        sensitivity: row.get(7)?,
        confidence: row.get(8)?,
        created_at: row.get(9)?,
    })
}

fn sqe(e: impl std::fmt::Display) -> StorageError {
    StorageError::SqliteError { message: e.to_string() }
}

fn collect_rows(
    rows: rusqlite::MappedRows<'_, impl FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<BoundaryRecord>>,
) -> Result<Vec<BoundaryRecord>, StorageError> {
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
             VALUES ('models.py', 1, x'00', 0, 0, 0)",
            [],
        )
        .unwrap();
        conn
    }

    #[test]
    fn inserts_and_filters_sensitive_boundaries() {
        let conn = setup();
        insert_boundaries(
            &conn,
            &[
                BoundaryRecord {
                    id: 0, file: "models.py".into(), framework: "django".into(),
                    model_name: "User".into(), table_name: Some("users".into()),
                    field_name: Some("ssn".into()), operation: "read".into(),
                    sensitivity: Some("pii".into()), confidence: 0.9, created_at: 0,
                },
                BoundaryRecord {
                    id: 0, file: "models.py".into(), framework: "django".into(),
                    model_name: "User".into(), table_name: Some("users".into()),
                    field_name: Some("name".into()), operation: "write".into(),
                    sensitivity: None, confidence: 0.9, created_at: 0,
                },
            ],
        )
        .unwrap();

        assert_eq!(count_boundaries(&conn).unwrap(), 2);
        assert_eq!(get_sensitive_boundaries(&conn).unwrap().len(), 1);
        assert_eq!(get_boundaries_by_framework(&conn, "django").unwrap().len(), 2);
        assert_eq!(get_mutating_boundaries(&conn).unwrap().len(), 1);

        delete_boundaries_by_file(&conn, "models.py").unwrap();
        assert_eq!(count_boundaries(&conn).unwrap(), 0);
    }
}
