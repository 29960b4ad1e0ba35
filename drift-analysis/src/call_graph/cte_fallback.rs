//! SQL-backed BFS for codebases too large to hold as an in-memory
//! `petgraph` all at once — walks the `call_edges` table with a recursive
//! CTE instead of `CallGraphBuilder::build` materializing every node.

use drift_core::errors::StorageError;
use rusqlite::{params, Connection};

/// Whether the in-memory graph builder should be skipped in favor of the
/// CTE fallback, given how many functions were discovered.
pub fn should_use_cte(threshold: usize, function_count: usize) -> bool {
    function_count > threshold
}

const FORWARD_CTE: &str = "
    WITH RECURSIVE reachable(id, depth) AS (
        SELECT callee_id, 1 FROM call_edges WHERE caller_id = ?1
        UNION
        SELECT e.callee_id, r.depth + 1
        FROM call_edges e
        JOIN reachable r ON e.caller_id = r.id
        WHERE ?2 IS NULL OR r.depth < ?2
    )
    SELECT DISTINCT id FROM reachable";

const INVERSE_CTE: &str = "
    WITH RECURSIVE reachable(id, depth) AS (
        SELECT caller_id, 1 FROM call_edges WHERE callee_id = ?1
        UNION
        SELECT e.caller_id, r.depth + 1
        FROM call_edges e
        JOIN reachable r ON e.callee_id = r.id
        WHERE ?2 IS NULL OR r.depth < ?2
    )
    SELECT DISTINCT id FROM reachable";

/// All function ids reachable forward (callees, transitively) from `start_id`.
pub fn cte_bfs_forward(
    conn: &Connection,
    start_id: i64,
    max_depth: Option<i64>,
) -> Result<Vec<i64>, StorageError> {
    run_cte(conn, FORWARD_CTE, start_id, max_depth)
}

/// All function ids reachable backward (callers, transitively) from `start_id`.
pub fn cte_bfs_inverse(
    conn: &Connection,
    start_id: i64,
    max_depth: Option<i64>,
) -> Result<Vec<i64>, StorageError> {
    run_cte(conn, INVERSE_CTE, start_id, max_depth)
}

fn run_cte(
    conn: &Connection,
    sql: &str,
    start_id: i64,
    max_depth: Option<i64>,
) -> Result<Vec<i64>, StorageError> {
    let mut stmt = conn.prepare_cached(sql).map_err(sqe)?;
    let rows = stmt
        .query_map(params![start_id, max_depth], |row| row.get(0))
        .map_err(sqe)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(sqe)?);
    }
    Ok(out)
}

fn sqe(e: impl std::fmt::Display) -> StorageError {
    StorageError::SqliteError { message: e.to_string() }
}
