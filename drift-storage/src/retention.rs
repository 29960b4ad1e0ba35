//! Retention, enforced after the materialized refresh (§4.2): append-only
//! tables (health trends, scan history, query telemetry) are trimmed by
//! both age and count, followed by a WAL TRUNCATE checkpoint. An
//! `incremental_vacuum` only runs when the freelist exceeds 20% of pages.

use drift_core::errors::StorageError;
use rusqlite::Connection;

use crate::connection::DatabaseManager;

const HEALTH_TREND_MAX_AGE_SECS: i64 = 180 * 86_400;
const HEALTH_TREND_MAX_ROWS: i64 = 10_000;
const SCAN_HISTORY_MAX_AGE_SECS: i64 = 90 * 86_400;
const SCAN_HISTORY_MAX_ROWS: i64 = 1_000;
const QUERY_TELEMETRY_MAX_AGE_SECS: i64 = 7 * 86_400;
const QUERY_TELEMETRY_MAX_ROWS: i64 = 50_000;

const FREELIST_VACUUM_THRESHOLD: f64 = 0.20;

#[derive(Debug, Clone, Copy, Default)]
pub struct RetentionStats {
    pub health_trends_deleted: i64,
    pub scan_history_deleted: i64,
    pub query_telemetry_deleted: i64,
    pub vacuumed: bool,
}

/// Trim append-only tables by age and count, checkpoint the WAL with
/// TRUNCATE, and run `incremental_vacuum` only if the freelist has grown
/// past the threshold.
pub fn enforce(db: &DatabaseManager, now: i64) -> Result<RetentionStats, StorageError> {
    let stats = db.with_writer(|conn| {
        let health_trends_deleted = trim_table(
            conn,
            "health_trends",
            "recorded_at",
            now - HEALTH_TREND_MAX_AGE_SECS,
            HEALTH_TREND_MAX_ROWS,
        )?;
        let scan_history_deleted = trim_table(
            conn,
            "scan_history",
            "started_at",
            now - SCAN_HISTORY_MAX_AGE_SECS,
            SCAN_HISTORY_MAX_ROWS,
        )?;
        let query_telemetry_deleted = trim_table(
            conn,
            "query_telemetry",
            "recorded_at",
            now - QUERY_TELEMETRY_MAX_AGE_SECS,
            QUERY_TELEMETRY_MAX_ROWS,
        )?;

        Ok(RetentionStats {
            health_trends_deleted,
            scan_history_deleted,
            query_telemetry_deleted,
            vacuumed: false,
        })
    })?;

    db.checkpoint(true)?;

    let vacuumed = maybe_vacuum(db)?;
    Ok(RetentionStats { vacuumed, ..stats })
}

/// Delete rows older than `cutoff`, then if still over `max_rows`, delete
/// the oldest excess rows by `time_col`.
fn trim_table(
    conn: &Connection,
    table: &str,
    time_col: &str,
    cutoff: i64,
    max_rows: i64,
) -> Result<i64, StorageError> {
    let by_age = conn
        .execute(
            &format!("DELETE FROM {table} WHERE {time_col} < ?1"),
            rusqlite::params![cutoff],
        )
        .map_err(sqe)?;

    let remaining: i64 = conn
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
        .map_err(sqe)?;

    let by_count = if remaining > max_rows {
        let excess = remaining - max_rows;
        conn.execute(
            &format!(
                "DELETE FROM {table} WHERE rowid IN
                    (SELECT rowid FROM {table} ORDER BY {time_col} ASC LIMIT ?1)"
            ),
            rusqlite::params![excess],
        )
        .map_err(sqe)?
    } else {
        0
    };

    Ok((by_age + by_count) as i64)
}

fn maybe_vacuum(db: &DatabaseManager) -> Result<bool, StorageError> {
    let (freelist, page_count): (i64, i64) = db.with_reader(|conn| {
        let freelist: i64 = conn.query_row("PRAGMA freelist_count", [], |r| r.get(0)).map_err(sqe)?;
        let page_count: i64 = conn.query_row("PRAGMA page_count", [], |r| r.get(0)).map_err(sqe)?;
        Ok((freelist, page_count))
    })?;

    if page_count == 0 {
        return Ok(false);
    }
    let ratio = freelist as f64 / page_count as f64;
    if ratio <= FREELIST_VACUUM_THRESHOLD {
        return Ok(false);
    }

    db.with_writer(|conn| {
        conn.execute_batch("PRAGMA incremental_vacuum").map_err(sqe)?;
        Ok(())
    })?;
    Ok(true)
}

fn sqe(e: impl std::fmt::Display) -> StorageError {
    StorageError::SqliteError { message: e.to_string() }
}
