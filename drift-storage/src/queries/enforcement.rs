//! violations, health_trends, and feedback table queries.

use drift_core::errors::StorageError;
use rusqlite::{params, Connection};

#[derive(Debug, Clone)]
pub struct ViolationRow {
    pub id: String,
    pub file: String,
    pub line: u32,
    pub column: Option<u32>,
    pub end_line: Option<u32>,
    pub end_column: Option<u32>,
    pub severity: String,
    pub pattern_id: String,
    pub rule_id: String,
    pub message: String,
    pub fingerprint: String,
    pub cwe_id: Option<u32>,
    pub owasp_category: Option<String>,
    pub suppressed: bool,
    pub is_new: bool,
    pub created_at: u64,
}

#[derive(Debug, Clone)]
pub struct HealthTrendRow {
    pub metric_name: String,
    pub metric_value: f64,
    pub recorded_at: u64,
}

#[derive(Debug, Clone)]
pub struct FeedbackRow {
    pub violation_id: String,
    pub pattern_id: String,
    pub detector_id: String,
    pub action: String,
    pub dismissal_reason: Option<String>,
    pub reason: Option<String>,
    pub author: Option<String>,
    pub created_at: u64,
}

#[derive(Debug, Clone, Default)]
pub struct FeedbackStats {
    pub total_count: u32,
    pub fix_count: u32,
    pub dismiss_count: u32,
    pub suppress_count: u32,
    pub escalate_count: u32,
}

// ── violations ──

pub fn insert_violation(conn: &Connection, v: &ViolationRow) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO violations
            (id, file, line, column_num, end_line, end_column, severity, pattern_id,
             rule_id, message, fingerprint, cwe_id, owasp_category, suppressed, is_new, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
         ON CONFLICT(id) DO UPDATE SET
            line = excluded.line, column_num = excluded.column_num,
            end_line = excluded.end_line, end_column = excluded.end_column,
            severity = excluded.severity, message = excluded.message,
            suppressed = excluded.suppressed, is_new = excluded.is_new,
            created_at = excluded.created_at",
        params![
            v.id, v.file, v.line, v.column, v.end_line, v.end_column, v.severity, v.pattern_id,
            v.rule_id, v.message, v.fingerprint, v.cwe_id, v.owasp_category, v.suppressed, v.is_new,
            v.created_at as i64,
        ],
    )
    .map_err(sqe)?;
    Ok(())
}

pub fn query_violations_by_file(
    conn: &Connection,
    file: &str,
) -> Result<Vec<ViolationRow>, StorageError> {
    let sql = format!("{SELECT_VIOLATION} WHERE file = ?1 ORDER BY line");
    let mut stmt = conn.prepare_cached(&sql).map_err(sqe)?;
    let rows = stmt.query_map(params![file], map_violation_row).map_err(sqe)?;
    collect(rows)
}

pub fn query_all_violations(conn: &Connection) -> Result<Vec<ViolationRow>, StorageError> {
    let sql = format!("{SELECT_VIOLATION} ORDER BY created_at DESC");
    let mut stmt = conn.prepare_cached(&sql).map_err(sqe)?;
    let rows = stmt.query_map([], map_violation_row).map_err(sqe)?;
    collect(rows)
}

pub fn find_violation_by_fingerprint(
    conn: &Connection,
    fingerprint: &str,
) -> Result<Option<ViolationRow>, StorageError> {
    let sql = format!("{SELECT_VIOLATION} WHERE fingerprint = ?1 ORDER BY created_at DESC LIMIT 1");
    let mut stmt = conn.prepare_cached(&sql).map_err(sqe)?;
    match stmt.query_row(params![fingerprint], map_violation_row) {
        Ok(r) => Ok(Some(r)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(sqe(e)),
    }
}

const SELECT_VIOLATION: &str = "SELECT id, file, line, column_num, end_line, end_column, severity,
     pattern_id, rule_id, message, fingerprint, cwe_id, owasp_category, suppressed, is_new, created_at
     FROM violations";

fn map_violation_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ViolationRow> {
    Ok(ViolationRow {
        id: row.get(0)?,
        file: row.get(1)?,
        line: row.get(2)?,
        column: row.get(3)?,
        end_line: row.get(4)?,
        end_column: row.get(5)?,
        severity: row.get(6)?,
        pattern_id: row.get(7)?,
        rule_id: row.get(8)?,
        message: row.get(9)?,
        fingerprint: row.get(10)?,
        cwe_id: row.get(11)?,
        owasp_category: row.get(12)?,
        suppressed: row.get(13)?,
        is_new: row.get(14)?,
        created_at: row.get::<_, i64>(15)? as u64,
    })
}

// ── health_trends ──

pub fn insert_health_trend(
    conn: &Connection,
    metric_name: &str,
    metric_value: f64,
    recorded_at: u64,
) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO health_trends (metric_name, metric_value, recorded_at) VALUES (?1, ?2, ?3)",
        params![metric_name, metric_value, recorded_at as i64],
    )
    .map_err(sqe)?;
    Ok(())
}

pub fn query_health_trends(
    conn: &Connection,
    metric_name: &str,
    limit: u32,
) -> Result<Vec<HealthTrendRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT metric_name, metric_value, recorded_at FROM health_trends
             WHERE metric_name = ?1 ORDER BY recorded_at DESC LIMIT ?2",
        )
        .map_err(sqe)?;
    let rows = stmt
        .query_map(params![metric_name, limit], |row| {
            Ok(HealthTrendRow {
                metric_name: row.get(0)?,
                metric_value: row.get(1)?,
                recorded_at: row.get::<_, i64>(2)? as u64,
            })
        })
        .map_err(sqe)?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(sqe)?);
    }
    Ok(result)
}

// ── feedback ──

pub fn insert_feedback(conn: &Connection, f: &FeedbackRow) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO feedback
            (violation_id, pattern_id, detector_id, action, dismissal_reason, reason, author, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            f.violation_id, f.pattern_id, f.detector_id, f.action,
            f.dismissal_reason, f.reason, f.author, f.created_at as i64,
        ],
    )
    .map_err(sqe)?;
    Ok(())
}

pub fn query_feedback_by_detector(
    conn: &Connection,
    detector_id: &str,
) -> Result<Vec<FeedbackRow>, StorageError> {
    let sql = format!("{SELECT_FEEDBACK} WHERE detector_id = ?1 ORDER BY created_at DESC");
    let mut stmt = conn.prepare_cached(&sql).map_err(sqe)?;
    let rows = stmt.query_map(params![detector_id], map_feedback_row).map_err(sqe)?;
    collect_feedback(rows)
}

pub fn query_feedback_by_pattern(
    conn: &Connection,
    pattern_id: &str,
) -> Result<Vec<FeedbackRow>, StorageError> {
    let sql = format!("{SELECT_FEEDBACK} WHERE pattern_id = ?1 ORDER BY created_at DESC");
    let mut stmt = conn.prepare_cached(&sql).map_err(sqe)?;
    let rows = stmt.query_map(params![pattern_id], map_feedback_row).map_err(sqe)?;
    collect_feedback(rows)
}

pub fn get_violation_pattern_id(
    conn: &Connection,
    violation_id: &str,
) -> Result<Option<String>, StorageError> {
    match conn.query_row(
        "SELECT pattern_id FROM violations WHERE id = ?1",
        params![violation_id],
        |row| row.get(0),
    ) {
        Ok(v) => Ok(Some(v)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(sqe(e)),
    }
}

pub fn query_feedback_stats(
    conn: &Connection,
    detector_id: &str,
) -> Result<FeedbackStats, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT action, COUNT(*) FROM feedback WHERE detector_id = ?1 GROUP BY action")
        .map_err(sqe)?;
    let rows = stmt
        .query_map(params![detector_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, u32>(1)?))
        })
        .map_err(sqe)?;

    let mut stats = FeedbackStats::default();
    for row in rows {
        let (action, count) = row.map_err(sqe)?;
        stats.total_count += count;
        match action.as_str() {
            "fix" => stats.fix_count = count,
            "dismiss" => stats.dismiss_count = count,
            "suppress" => stats.suppress_count = count,
            "escalate" => stats.escalate_count = count,
            _ => {}
        }
    }
    Ok(stats)
}

/// False-positive rate over the trailing `window_days`: dismissals divided
/// by total feedback on the detector in that window.
pub fn detector_false_positive_rate(
    conn: &Connection,
    detector_id: &str,
    window_days: u32,
    now: u64,
) -> Result<f64, StorageError> {
    let cutoff = now.saturating_sub(window_days as u64 * 86_400);
    let (total, dismissed): (i64, i64) = conn
        .query_row(
            "SELECT COUNT(*), COALESCE(SUM(CASE WHEN action = 'dismiss' THEN 1 ELSE 0 END), 0)
             FROM feedback WHERE detector_id = ?1 AND created_at >= ?2",
            params![detector_id, cutoff as i64],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .map_err(sqe)?;

    if total == 0 {
        return Ok(0.0);
    }
    Ok(dismissed as f64 / total as f64)
}

const SELECT_FEEDBACK: &str =
    "SELECT violation_id, pattern_id, detector_id, action, dismissal_reason, reason, author, created_at
     FROM feedback";

fn map_feedback_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<FeedbackRow> {
    Ok(FeedbackRow {
        violation_id: row.get(0)?,
        pattern_id: row.get(1)?,
        detector_id: row.get(2)?,
        action: row.get(3)?,
        dismissal_reason: row.get(4)?,
        reason: row.get(5)?,
        author: row.get(6)?,
        created_at: row.get::<_, i64>(7)? as u64,
    })
}

fn sqe(e: impl std::fmt::Display) -> StorageError {
    StorageError::SqliteError { message: e.to_string() }
}

fn collect(
    rows: rusqlite::MappedRows<'_, impl FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<ViolationRow>>,
) -> Result<Vec<ViolationRow>, StorageError> {
    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(sqe)?);
    }
    Ok(result)
}

fn collect_feedback(
    rows: rusqlite::MappedRows<'_, impl FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<FeedbackRow>>,
) -> Result<Vec<FeedbackRow>, StorageError> {
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

    fn sample_violation(id: &str) -> ViolationRow {
        ViolationRow {
            id: id.to_string(), file: "a.rs".into(), line: 3, column: Some(4),
            end_line: None, end_column: None, severity: "error".into(),
            pattern_id: "camelCase".into(), rule_id: "styling/camelCase".into(),
            message: "deviates".into(), fingerprint: "abc123".into(),
            cwe_id: None, owasp_category: None, suppressed: false, is_new: true, created_at: 10,
        }
    }

    #[test]
    fn inserts_and_finds_by_fingerprint() {
        let conn = setup();
        insert_violation(&conn, &sample_violation("v1")).unwrap();
        assert_eq!(query_violations_by_file(&conn, "a.rs").unwrap().len(), 1);
        assert!(find_violation_by_fingerprint(&conn, "abc123").unwrap().is_some());
        assert!(find_violation_by_fingerprint(&conn, "missing").unwrap().is_none());
        assert_eq!(get_violation_pattern_id(&conn, "v1").unwrap().as_deref(), Some("camelCase"));
    }

    #[test]
    fn upserts_violation_on_conflicting_id() {
        let conn = setup();
        insert_violation(&conn, &sample_violation("v1")).unwrap();
        let mut updated = sample_violation("v1");
        updated.severity = "warning".into();
        insert_violation(&conn, &updated).unwrap();
        let all = query_all_violations(&conn).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].severity, "warning");
    }

    #[test]
    fn tracks_feedback_stats_and_false_positive_rate() {
        let conn = setup();
        insert_violation(&conn, &sample_violation("v1")).unwrap();
        insert_feedback(&conn, &FeedbackRow {
            violation_id: "v1".into(), pattern_id: "camelCase".into(), detector_id: "det1".into(),
            action: "dismiss".into(), dismissal_reason: Some("false positive".into()),
            reason: None, author: None, created_at: 100,
        }).unwrap();
        insert_feedback(&conn, &FeedbackRow {
            violation_id: "v1".into(), pattern_id: "camelCase".into(), detector_id: "det1".into(),
            action: "fix".into(), dismissal_reason: None, reason: None, author: None, created_at: 200,
        }).unwrap();

        let stats = query_feedback_stats(&conn, "det1").unwrap();
        assert_eq!(stats.total_count, 2);
        assert_eq!(stats.dismiss_count, 1);
        assert_eq!(stats.fix_count, 1);

        let rate = detector_false_positive_rate(&conn, "det1", 30, 1_000).unwrap();
        assert!((rate - 0.5).abs() < 1e-9);
    }

    #[test]
    fn records_health_trend_samples() {
        let conn = setup();
        insert_health_trend(&conn, "error_rate", 0.1, 10).unwrap();
        insert_health_trend(&conn, "error_rate", 0.2, 20).unwrap();
        let trends = query_health_trends(&conn, "error_rate", 10).unwrap();
        assert_eq!(trends.len(), 2);
        assert_eq!(trends[0].recorded_at, 20);
    }
}
