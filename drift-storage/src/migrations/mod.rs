//! Linear, numbered schema migrations (§4.2). Each migration is pure SQL
//! and irreversible; the store refuses to open at a lower code version
//! than the one recorded in `user_version`.

use drift_core::errors::StorageError;
use rusqlite::Connection;

/// Migrations in order, indexed by their target `user_version`.
const MIGRATIONS: &[&str] = &[M001_CORE, M002_ENFORCEMENT, M003_MATERIALIZED, M004_BOUNDARY_OPERATION];

const M001_CORE: &str = include_str!("m001_core.sql");
const M002_ENFORCEMENT: &str = include_str!("m002_enforcement.sql");
const M003_MATERIALIZED: &str = include_str!("m003_materialized.sql");
const M004_BOUNDARY_OPERATION: &str = include_str!("m004_boundary_operation.sql");

/// Run every migration newer than the database's current `user_version`.
pub fn run(conn: &Connection) -> Result<(), StorageError> {
    let current: u32 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(sqe)?;

    let target = MIGRATIONS.len() as u32;
    if current > target {
        return Err(StorageError::MigrationFailed {
            version: current,
            message: format!(
                "database is at version {current}, newer than this build's {target}"
            ),
        });
    }

    for (idx, sql) in MIGRATIONS.iter().enumerate() {
        let version = (idx + 1) as u32;
        if version <= current {
            continue;
        }
        conn.execute_batch(sql).map_err(|e| StorageError::MigrationFailed {
            version,
            message: e.to_string(),
        })?;
        conn.pragma_update(None, "user_version", version).map_err(sqe)?;
    }

    Ok(())
}

fn sqe(e: impl std::fmt::Display) -> StorageError {
    StorageError::SqliteError { message: e.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_once_and_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();
        run(&conn).unwrap();
        let version: u32 = conn.query_row("PRAGMA user_version", [], |r| r.get(0)).unwrap();
        assert_eq!(version, MIGRATIONS.len() as u32);
    }

    #[test]
    fn refuses_to_downgrade() {
        let conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "user_version", MIGRATIONS.len() as u32 + 1).unwrap();
        assert!(run(&conn).is_err());
    }
}
