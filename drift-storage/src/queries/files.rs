//! file_metadata table queries.

use drift_core::errors::StorageError;
use rusqlite::{params, Connection};

/// A file metadata record from the database.
#[derive(Debug, Clone)]
pub struct FileMetadataRecord {
    pub path: String,
    pub language: Option<String>,
    pub file_size: i64,
    pub content_hash: Vec<u8>,
    pub mtime_secs: i64,
    pub mtime_nanos: i64,
    pub last_scanned_at: i64,
    pub scan_duration_us: Option<i64>,
    pub pattern_count: i64,
    pub function_count: i64,
    pub error_count: i64,
    pub error: Option<String>,
}

/// Load every file_metadata row, used for incremental scan comparison.
pub fn load_all_file_metadata(conn: &Connection) -> Result<Vec<FileMetadataRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT path, language, file_size, content_hash, mtime_secs, mtime_nanos,
                    last_scanned_at, scan_duration_us, pattern_count, function_count,
                    error_count, error
             FROM file_metadata",
        )
        .map_err(sqe)?;

    let rows = stmt.query_map([], map_row).map_err(sqe)?;
    collect_rows(rows)
}

pub fn get_file_metadata(
    conn: &Connection,
    path: &str,
) -> Result<Option<FileMetadataRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT path, language, file_size, content_hash, mtime_secs, mtime_nanos,
                    last_scanned_at, scan_duration_us, pattern_count, function_count,
                    error_count, error
             FROM file_metadata WHERE path = ?1",
        )
        .map_err(sqe)?;

    stmt.query_row(params![path], map_row).optional_sqe()
}

pub fn update_function_count(
    conn: &Connection,
    path: &str,
    count: i64,
) -> Result<(), StorageError> {
    conn.execute(
        "UPDATE file_metadata SET function_count = ?2 WHERE path = ?1",
        params![path, count],
    )
    .map_err(sqe)?;
    Ok(())
}

pub fn update_file_error(
    conn: &Connection,
    path: &str,
    error_count: i64,
    error_msg: Option<&str>,
) -> Result<(), StorageError> {
    conn.execute(
        "UPDATE file_metadata SET error_count = ?2, error = ?3 WHERE path = ?1",
        params![path, error_count, error_msg],
    )
    .map_err(sqe)?;
    Ok(())
}

pub fn count_files(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM file_metadata", [], |row| row.get(0)).map_err(sqe)
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<FileMetadataRecord> {
    Ok(FileMetadataRecord {
        path: row.get(0)?,
        language: row.get(1)?,
        file_size: row.get(2)?,
        content_hash: row.get(3)?,
        mtime_secs: row.get(4)?,
        mtime_nanos: row.get(5)?,
        last_scanned_at: row.get(6)?,
        scan_duration_us: row.get(7)?,
        pattern_count: row.get(8)?,
        function_count: row.get(9)?,
        error_count: row.get(10)?,
        error: row.get(11)?,
    })
}

fn sqe(e: impl std::fmt::Display) -> StorageError {
    StorageError::SqliteError { message: e.to_string() }
}

fn collect_rows(
    rows: rusqlite::MappedRows<'_, impl FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<FileMetadataRecord>>,
) -> Result<Vec<FileMetadataRecord>, StorageError> {
    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(sqe)?);
    }
    Ok(result)
}

trait OptionalSqe<T> {
    fn optional_sqe(self) -> Result<Option<T>, StorageError>;
}

impl<T> OptionalSqe<T> for rusqlite::Result<T> {
    fn optional_sqe(self) -> Result<Option<T>, StorageError> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(sqe(e)),
        }
    }
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
    fn round_trips_file_metadata() {
        let conn = setup();
        conn.execute(
            "INSERT INTO file_metadata (path, language, file_size, content_hash, mtime_secs, mtime_nanos, last_scanned_at)
             VALUES ('src/lib.rs', 'rust', 128, x'aa', 10, 0, 100)",
            [],
        )
        .unwrap();

        let row = get_file_metadata(&conn, "src/lib.rs").unwrap().unwrap();
        assert_eq!(row.language.as_deref(), Some("rust"));
        assert_eq!(row.file_size, 128);

        update_function_count(&conn, "src/lib.rs", 3).unwrap();
        let row = get_file_metadata(&conn, "src/lib.rs").unwrap().unwrap();
        assert_eq!(row.function_count, 3);

        assert_eq!(count_files(&conn).unwrap(), 1);
        assert!(get_file_metadata(&conn, "missing.rs").unwrap().is_none());
    }
}
