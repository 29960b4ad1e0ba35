//! Post-scan "gold" refresh (§4.2): two singleton summary tables are
//! rebuilt inside one `BEGIN IMMEDIATE` transaction. Security goes first
//! since status reads its risk level; a health-trend row is appended last.
//! Selective refresh skips a domain whose inputs didn't change; full
//! refresh recomputes both from scratch.

use drift_core::errors::StorageError;
use rusqlite::{params, Connection};

use crate::connection::DatabaseManager;
use crate::queries::enforcement::insert_health_trend;

/// Which summary domains changed this scan. Both `true` is a full refresh.
#[derive(Debug, Clone, Copy, Default)]
pub struct RefreshDomains {
    pub security: bool,
    pub status: bool,
}

impl RefreshDomains {
    pub fn full() -> Self {
        Self { security: true, status: true }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterializedStatus {
    pub health_score: f64,
    pub trend: String,
    pub last_scan_at: Option<i64>,
    pub file_count: i64,
    pub pattern_count: i64,
    pub approved_count: i64,
    pub critical_violations: i64,
    pub warnings: i64,
    pub security_risk_level: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterializedSecurity {
    pub risk_level: String,
    pub sensitive_field_count: i64,
    pub unprotected_access_points: i64,
    pub top_risk_tables: String,
}

/// Rebuild `materialized_security`, then `materialized_status` (which reads
/// the just-written risk level), then append a health-trend sample — all in
/// one `BEGIN IMMEDIATE` transaction.
pub fn refresh(
    db: &DatabaseManager,
    domains: RefreshDomains,
    last_scan_id: Option<i64>,
    now: i64,
) -> Result<(), StorageError> {
    db.with_writer(|conn| {
        conn.execute_batch("BEGIN IMMEDIATE").map_err(sqe)?;

        let result = (|| -> Result<(), StorageError> {
            if domains.security {
                let security = compute_security(conn)?;
                upsert_security(conn, &security, now)?;
            }
            if domains.status {
                let risk_level = read_security_risk_level(conn)?;
                let status = compute_status(conn, &risk_level, last_scan_id, now)?;
                upsert_status(conn, &status, now)?;
            }
            insert_health_trend(conn, "materialized_refresh", 1.0, now as u64)
        })();

        match result {
            Ok(()) => conn.execute_batch("COMMIT").map_err(sqe),
            Err(e) => {
                let _ = conn.execute_batch("ROLLBACK");
                Err(e)
            }
        }
    })
}

fn compute_security(conn: &Connection) -> Result<MaterializedSecurity, StorageError> {
    let sensitive_field_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM boundaries WHERE sensitivity IS NOT NULL",
            [],
            |r| r.get(0),
        )
        .map_err(sqe)?;

    // Low-confidence sensitive boundaries have no corroborating high-confidence
    // classification backing them — treated as not yet confidently protected.
    let unprotected_access_points: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM boundaries WHERE sensitivity IS NOT NULL AND confidence < 0.5",
            [],
            |r| r.get(0),
        )
        .map_err(sqe)?;

    let has_critical: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM boundaries
               WHERE sensitivity IN ('Credentials', 'Financial') AND confidence >= 0.7)",
            [],
            |r| r.get(0),
        )
        .map_err(sqe)?;
    let has_high: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM boundaries WHERE sensitivity = 'PII' AND confidence >= 0.7)",
            [],
            |r| r.get(0),
        )
        .map_err(sqe)?;

    let risk_level = if has_critical {
        "Critical"
    } else if has_high || sensitive_field_count >= 10 {
        "High"
    } else if sensitive_field_count >= 1 {
        "Medium"
    } else {
        "Low"
    }
    .to_string();

    let mut stmt = conn
        .prepare_cached(
            "SELECT table_name, COUNT(*) as c FROM boundaries
             WHERE sensitivity IS NOT NULL AND table_name IS NOT NULL
             GROUP BY table_name ORDER BY c DESC LIMIT 5",
        )
        .map_err(sqe)?;
    let tables: Vec<String> = stmt
        .query_map([], |r| r.get::<_, String>(0))
        .map_err(sqe)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(sqe)?;
    let top_risk_tables = serde_json::to_string(&tables).map_err(|e| StorageError::SqliteError {
        message: format!("serialize top_risk_tables: {e}"),
    })?;

    Ok(MaterializedSecurity {
        risk_level,
        sensitive_field_count,
        unprotected_access_points,
        top_risk_tables,
    })
}

fn upsert_security(
    conn: &Connection,
    security: &MaterializedSecurity,
    now: i64,
) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO materialized_security
            (id, risk_level, sensitive_field_count, unprotected_access_points, top_risk_tables, updated_at)
         VALUES (1, ?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(id) DO UPDATE SET
            risk_level = excluded.risk_level,
            sensitive_field_count = excluded.sensitive_field_count,
            unprotected_access_points = excluded.unprotected_access_points,
            top_risk_tables = excluded.top_risk_tables,
            updated_at = excluded.updated_at",
        params![
            security.risk_level,
            security.sensitive_field_count,
            security.unprotected_access_points,
            security.top_risk_tables,
            now,
        ],
    )
    .map_err(sqe)?;
    Ok(())
}

fn read_security_risk_level(conn: &Connection) -> Result<String, StorageError> {
    match conn.query_row(
        "SELECT risk_level FROM materialized_security WHERE id = 1",
        [],
        |r| r.get(0),
    ) {
        Ok(level) => Ok(level),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok("Low".to_string()),
        Err(e) => Err(sqe(e)),
    }
}

fn compute_status(
    conn: &Connection,
    security_risk_level: &str,
    last_scan_id: Option<i64>,
    now: i64,
) -> Result<MaterializedStatus, StorageError> {
    let file_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM file_metadata", [], |r| r.get(0))
        .map_err(sqe)?;
    let pattern_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM pattern_confidence", [], |r| r.get(0))
        .map_err(sqe)?;
    let approved_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM conventions WHERE promotion_status = 'approved'",
            [],
            |r| r.get(0),
        )
        .map_err(sqe)?;
    let critical_violations: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM violations WHERE severity = 'critical' AND suppressed = 0",
            [],
            |r| r.get(0),
        )
        .map_err(sqe)?;
    let warnings: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM violations WHERE severity = 'warning' AND suppressed = 0",
            [],
            |r| r.get(0),
        )
        .map_err(sqe)?;

    let health_score = (100.0 - (critical_violations as f64 * 5.0 + warnings as f64 * 1.0)).clamp(0.0, 100.0);

    let previous_score: Option<f64> = conn
        .query_row("SELECT health_score FROM materialized_status WHERE id = 1", [], |r| r.get(0))
        .ok();
    let trend = match previous_score {
        Some(prev) if health_score > prev => "Improving",
        Some(prev) if health_score < prev => "Declining",
        _ => "Stable",
    }
    .to_string();

    let last_scan_at = if last_scan_id.is_some() { Some(now) } else { None };

    Ok(MaterializedStatus {
        health_score,
        trend,
        last_scan_at,
        file_count,
        pattern_count,
        approved_count,
        critical_violations,
        warnings,
        security_risk_level: security_risk_level.to_string(),
    })
}

fn upsert_status(conn: &Connection, status: &MaterializedStatus, now: i64) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO materialized_status
            (id, health_score, trend, last_scan_at, file_count, pattern_count,
             approved_count, critical_violations, warnings, security_risk_level, updated_at)
         VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
         ON CONFLICT(id) DO UPDATE SET
            health_score = excluded.health_score,
            trend = excluded.trend,
            last_scan_at = excluded.last_scan_at,
            file_count = excluded.file_count,
            pattern_count = excluded.pattern_count,
            approved_count = excluded.approved_count,
            critical_violations = excluded.critical_violations,
            warnings = excluded.warnings,
            security_risk_level = excluded.security_risk_level,
            updated_at = excluded.updated_at",
        params![
            status.health_score,
            status.trend,
            status.last_scan_at,
            status.file_count,
            status.pattern_count,
            status.approved_count,
            status.critical_violations,
            status.warnings,
            status.security_risk_level,
            now,
        ],
    )
    .map_err(sqe)?;
    Ok(())
}

fn sqe(e: impl std::fmt::Display) -> StorageError {
    StorageError::SqliteError { message: e.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> DatabaseManager {
        DatabaseManager::open_in_memory().unwrap()
    }

    #[test]
    fn full_refresh_reflects_base_tables() {
        let db = setup();
        db.with_writer(|conn| {
            conn.execute(
                "INSERT INTO file_metadata (path, file_size, content_hash, mtime_secs, mtime_nanos, last_scanned_at)
                 VALUES ('a.rs', 10, x'00', 0, 0, 0)",
                [],
            )
            .map_err(sqe)?;
            Ok(())
        })
        .unwrap();

        refresh(&db, RefreshDomains::full(), Some(1), 100).unwrap();

        let status = db
            .with_reader(|conn| {
                conn.query_row(
                    "SELECT file_count, security_risk_level FROM materialized_status WHERE id = 1",
                    [],
                    |r| Ok((r.get::<_, i64>(0)?, r.get::<_, String>(1)?)),
                )
                .map_err(sqe)
            })
            .unwrap();
        assert_eq!(status.0, 1);
        assert_eq!(status.1, "Low");
    }

    #[test]
    fn security_ordering_propagates_critical_risk_to_status() {
        let db = setup();
        db.with_writer(|conn| {
            conn.execute(
                "INSERT INTO file_metadata (path, file_size, content_hash, mtime_secs, mtime_nanos, last_scanned_at)
                 VALUES ('a.rs', 10, x'00', 0, 0, 0)",
                [],
            )
            .map_err(sqe)?;
            conn.execute(
                "INSERT INTO boundaries (file, framework, model_name, table_name, field_name, sensitivity, confidence)
                 VALUES ('a.rs', 'prisma', 'User', 'users', 'ssn', 'Credentials', 0.95)",
                [],
            )
            .map_err(sqe)?;
            Ok(())
        })
        .unwrap();

        refresh(&db, RefreshDomains::full(), Some(1), 100).unwrap();

        let (security_risk, status_risk): (String, String) = db
            .with_reader(|conn| {
                let sec: String =
                    conn.query_row("SELECT risk_level FROM materialized_security WHERE id = 1", [], |r| r.get(0))
                        .map_err(sqe)?;
                let st: String =
                    conn.query_row("SELECT security_risk_level FROM materialized_status WHERE id = 1", [], |r| r.get(0))
                        .map_err(sqe)?;
                Ok((sec, st))
            })
            .unwrap();
        assert_eq!(security_risk, "Critical");
        assert_eq!(status_risk, "Critical");
    }
}
