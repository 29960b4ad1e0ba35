//! `DriftStorageEngine` — unified storage engine implementing all 7 drift storage traits.
//!
//! Wraps `DatabaseManager` (read/write routing) + `BatchWriter` (async batch writes).
//! All reads go through `with_reader()`; direct writes go through
//! `with_writer()` and batched writes go through `BatchWriter`, but both paths
//! lock the same single `Arc<Mutex<Connection>>` (`DatabaseManager::writer_handle`) —
//! there is exactly one writer connection for the whole engine (§4.2). No code
//! outside this module should touch a raw `&Connection` for drift.db operations.
//!
//! Pattern reference: `cortex-storage/src/engine.rs`

use std::path::Path;

use drift_core::errors::StorageError;
use drift_core::traits::storage::drift_files::{
    FileMetadataRow, IDriftFiles, ParseCacheRow,
};
use drift_core::traits::storage::drift_analysis::{
    BoundaryRow, CallEdgeRow, ConventionRow, DetectionRow, DetectionSummaryRow,
    FunctionRow, IDriftAnalysis, OutlierRow, PatternConfidenceRow, ScanHistoryRow,
};
use drift_core::traits::storage::drift_enforcement::{
    FeedbackRow, FeedbackStats, HealthTrendRow, IDriftEnforcement, ViolationRow,
};
use drift_core::traits::storage::drift_batch::{IDriftBatchWriter, WriteStats};

use crate::batch::commands::BatchCommand;
use crate::batch::BatchWriter;
use crate::connection::DatabaseManager;
use crate::queries;

/// The unified Drift storage engine.
///
/// Owns `DatabaseManager` (single write connection + read pool) and
/// `BatchWriter` (async batch writes via crossbeam channel).
/// Implements all 7 drift storage traits from `drift-core`.
pub struct DriftStorageEngine {
    db: DatabaseManager,
    batch: BatchWriter,
}

impl DriftStorageEngine {
    /// Open a file-backed storage engine at the given path.
    /// Runs migrations and applies pragmas.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let db = DatabaseManager::open(path)?;
        let batch = BatchWriter::new(db.writer_handle());
        Ok(Self { db, batch })
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let db = DatabaseManager::open_in_memory()?;
        let batch = BatchWriter::new(db.writer_handle());
        Ok(Self { db, batch })
    }

    /// Send a typed `BatchCommand` to the batch writer.
    /// This is the concrete method for NAPI bindings — NOT on the trait.
    pub fn send_batch(&self, command: BatchCommand) -> Result<(), StorageError> {
        self.batch.send(command)
    }

    /// WAL checkpoint delegation.
    pub fn checkpoint(&self, truncate: bool) -> Result<(), StorageError> {
        self.db.checkpoint(truncate)
    }

    /// Database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.db.path()
    }

    /// Flush pending batch writes (fire-and-forget).
    pub fn flush_batch(&self) -> Result<(), StorageError> {
        self.batch.flush()
    }

    /// Flush pending batch writes and block until complete.
    pub fn flush_batch_sync(&self) -> Result<(), StorageError> {
        self.batch.flush_sync()
    }

    /// Raw read access — for operations not yet covered by a trait method.
    /// Prefer trait methods where possible.
    pub fn with_reader<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&rusqlite::Connection) -> Result<T, StorageError>,
    {
        self.db.with_reader(f)
    }

    /// Raw write access — for operations not yet covered by a trait method.
    /// Prefer trait methods where possible.
    pub fn with_writer<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&rusqlite::Connection) -> Result<T, StorageError>,
    {
        self.db.with_writer(f)
    }

}

// ─── Helper: StorageError from rusqlite ─────────────────────────────────────

fn sqe(e: impl std::fmt::Display) -> StorageError {
    StorageError::SqliteError {
        message: e.to_string(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// From impls: drift-storage record types → drift-core trait row types
// ═══════════════════════════════════════════════════════════════════════════════

impl From<queries::files::FileMetadataRecord> for FileMetadataRow {
    fn from(r: queries::files::FileMetadataRecord) -> Self {
        Self {
            path: r.path,
            language: r.language,
            file_size: r.file_size,
            content_hash: r.content_hash,
            mtime_secs: r.mtime_secs,
            mtime_nanos: r.mtime_nanos,
            last_scanned_at: r.last_scanned_at,
            scan_duration_us: r.scan_duration_us,
            pattern_count: r.pattern_count,
            function_count: r.function_count,
            error_count: r.error_count,
            error: r.error,
        }
    }
}

impl From<queries::parse_cache::ParseCacheRecord> for ParseCacheRow {
    fn from(r: queries::parse_cache::ParseCacheRecord) -> Self {
        Self {
            content_hash: r.content_hash,
            language: r.language,
            parse_result_json: r.parse_result_json,
            created_at: r.created_at,
        }
    }
}

impl From<queries::functions::FunctionRecord> for FunctionRow {
    fn from(r: queries::functions::FunctionRecord) -> Self {
        Self {
            id: r.id,
            file: r.file,
            name: r.name,
            qualified_name: r.qualified_name,
            language: r.language,
            line: r.line,
            end_line: r.end_line,
            parameter_count: r.parameter_count,
            return_type: r.return_type,
            is_exported: r.is_exported,
            is_async: r.is_async,
            body_hash: r.body_hash,
            signature_hash: r.signature_hash,
        }
    }
}

impl From<queries::detections::DetectionRecord> for DetectionRow {
    fn from(r: queries::detections::DetectionRecord) -> Self {
        Self {
            id: r.id,
            file: r.file,
            line: r.line,
            column_num: r.column_num,
            pattern_id: r.pattern_id,
            category: r.category,
            confidence: r.confidence,
            detection_method: r.detection_method,
            cwe_ids: r.cwe_ids,
            owasp: r.owasp,
            matched_text: r.matched_text,
            created_at: r.created_at,
        }
    }
}

impl From<queries::detections::DetectionSummaryRow> for DetectionSummaryRow {
    fn from(r: queries::detections::DetectionSummaryRow) -> Self {
        Self {
            detection_method: r.detection_method,
            count: r.count,
            avg_confidence: r.avg_confidence,
        }
    }
}

impl From<queries::patterns::PatternConfidenceRow> for PatternConfidenceRow {
    fn from(r: queries::patterns::PatternConfidenceRow) -> Self {
        Self {
            pattern_id: r.pattern_id,
            alpha: r.alpha,
            beta: r.beta,
            posterior_mean: r.posterior_mean,
            credible_interval_low: r.credible_interval_low,
            credible_interval_high: r.credible_interval_high,
            tier: r.tier,
            momentum: r.momentum,
            last_updated: r.last_updated,
        }
    }
}

impl From<&PatternConfidenceRow> for queries::patterns::PatternConfidenceRow {
    fn from(r: &PatternConfidenceRow) -> Self {
        Self {
            pattern_id: r.pattern_id.clone(),
            alpha: r.alpha,
            beta: r.beta,
            posterior_mean: r.posterior_mean,
            credible_interval_low: r.credible_interval_low,
            credible_interval_high: r.credible_interval_high,
            tier: r.tier.clone(),
            momentum: r.momentum.clone(),
            last_updated: r.last_updated,
        }
    }
}

impl From<queries::patterns::OutlierRow> for OutlierRow {
    fn from(r: queries::patterns::OutlierRow) -> Self {
        Self {
            id: r.id,
            pattern_id: r.pattern_id,
            file: r.file,
            line: r.line,
            deviation_score: r.deviation_score,
            significance: r.significance,
            method: r.method,
            created_at: r.created_at,
        }
    }
}

impl From<&OutlierRow> for queries::patterns::OutlierRow {
    fn from(r: &OutlierRow) -> Self {
        Self {
            id: r.id,
            pattern_id: r.pattern_id.clone(),
            file: r.file.clone(),
            line: r.line,
            deviation_score: r.deviation_score,
            significance: r.significance.clone(),
            method: r.method.clone(),
            created_at: r.created_at,
        }
    }
}

impl From<queries::patterns::ConventionRow> for ConventionRow {
    fn from(r: queries::patterns::ConventionRow) -> Self {
        Self {
            id: r.id,
            pattern_id: r.pattern_id,
            category: r.category,
            scope: r.scope,
            dominance_ratio: r.dominance_ratio,
            promotion_status: r.promotion_status,
            discovered_at: r.discovered_at,
            last_seen: r.last_seen,
            expires_at: r.expires_at,
        }
    }
}

impl From<&ConventionRow> for queries::patterns::ConventionRow {
    fn from(r: &ConventionRow) -> Self {
        Self {
            id: r.id,
            pattern_id: r.pattern_id.clone(),
            category: r.category.clone(),
            scope: r.scope.clone(),
            dominance_ratio: r.dominance_ratio,
            promotion_status: r.promotion_status.clone(),
            discovered_at: r.discovered_at,
            last_seen: r.last_seen,
            expires_at: r.expires_at,
        }
    }
}

impl From<queries::boundaries::BoundaryRecord> for BoundaryRow {
    fn from(r: queries::boundaries::BoundaryRecord) -> Self {
        Self {
            id: r.id,
            file: r.file,
            framework: r.framework,
            model_name: r.model_name,
            table_name: r.table_name,
            field_name: r.field_name,
            operation: r.operation,
            sensitivity: r.sensitivity,
            confidence: r.confidence,
            created_at: r.created_at,
        }
    }
}

impl From<queries::call_edges::CallEdgeRecord> for CallEdgeRow {
    fn from(r: queries::call_edges::CallEdgeRecord) -> Self {
        Self {
            caller_id: r.caller_id,
            callee_id: r.callee_id,
            resolution: r.resolution,
            confidence: r.confidence,
            call_site_line: r.call_site_line,
        }
    }
}

impl From<queries::scan_history::ScanHistoryRow> for ScanHistoryRow {
    fn from(r: queries::scan_history::ScanHistoryRow) -> Self {
        Self {
            id: r.id,
            started_at: r.started_at,
            completed_at: r.completed_at,
            root_path: r.root_path,
            total_files: r.total_files,
            added_files: r.added_files,
            modified_files: r.modified_files,
            removed_files: r.removed_files,
            unchanged_files: r.unchanged_files,
            duration_ms: r.duration_ms,
            status: r.status,
            error: r.error,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// IDriftFiles implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl IDriftFiles for DriftStorageEngine {
    fn load_all_file_metadata(&self) -> Result<Vec<FileMetadataRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::files::load_all_file_metadata(conn)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn get_file_metadata(&self, path: &str) -> Result<Option<FileMetadataRow>, StorageError> {
        self.db.with_reader(|conn| {
            let row = queries::files::get_file_metadata(conn, path)?;
            Ok(row.map(Into::into))
        })
    }

    fn update_function_count(&self, path: &str, count: i64) -> Result<(), StorageError> {
        self.db.with_writer(|conn| {
            queries::files::update_function_count(conn, path, count)
        })
    }

    fn update_file_error(
        &self,
        path: &str,
        error_count: i64,
        error_msg: Option<&str>,
    ) -> Result<(), StorageError> {
        self.db.with_writer(|conn| {
            queries::files::update_file_error(conn, path, error_count, error_msg)
        })
    }

    fn count_files(&self) -> Result<i64, StorageError> {
        self.db.with_reader(queries::files::count_files)
    }

    fn get_parse_cache_by_hash(
        &self,
        content_hash: &[u8],
    ) -> Result<Option<ParseCacheRow>, StorageError> {
        self.db.with_reader(|conn| {
            let row = queries::parse_cache::get_by_hash(conn, content_hash)?;
            Ok(row.map(Into::into))
        })
    }

    fn insert_parse_cache(
        &self,
        content_hash: &[u8],
        language: &str,
        parse_result_json: &str,
        created_at: i64,
    ) -> Result<(), StorageError> {
        self.db.with_writer(|conn| {
            queries::parse_cache::insert(conn, content_hash, language, parse_result_json, created_at)
        })
    }

    fn invalidate_parse_cache(&self, content_hash: &[u8]) -> Result<(), StorageError> {
        self.db.with_writer(|conn| {
            queries::parse_cache::invalidate(conn, content_hash)
        })
    }

    fn count_parse_cache(&self) -> Result<i64, StorageError> {
        self.db.with_reader(queries::parse_cache::count)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// IDriftAnalysis implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl IDriftAnalysis for DriftStorageEngine {
    // ── functions ──

    fn get_functions_by_file(&self, file: &str) -> Result<Vec<FunctionRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::functions::get_functions_by_file(conn, file)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn get_function_by_qualified_name(
        &self,
        qualified_name: &str,
    ) -> Result<Option<FunctionRow>, StorageError> {
        self.db.with_reader(|conn| {
            let row = queries::functions::get_function_by_qualified_name(conn, qualified_name)?;
            Ok(row.map(Into::into))
        })
    }

    fn delete_functions_by_file(&self, file: &str) -> Result<usize, StorageError> {
        self.db.with_writer(|conn| {
            queries::functions::delete_functions_by_file(conn, file)
        })
    }

    fn count_functions(&self) -> Result<i64, StorageError> {
        self.db.with_reader(queries::functions::count_functions)
    }

    fn count_entry_points(&self) -> Result<i64, StorageError> {
        self.db.with_reader(queries::functions::count_entry_points)
    }

    // ── detections ──

    fn insert_detections(&self, detections: &[DetectionRow]) -> Result<usize, StorageError> {
        let records: Vec<queries::detections::DetectionRecord> = detections
            .iter()
            .map(|d| queries::detections::DetectionRecord {
                id: d.id,
                file: d.file.clone(),
                line: d.line,
                column_num: d.column_num,
                pattern_id: d.pattern_id.clone(),
                category: d.category.clone(),
                confidence: d.confidence,
                detection_method: d.detection_method.clone(),
                cwe_ids: d.cwe_ids.clone(),
                owasp: d.owasp.clone(),
                matched_text: d.matched_text.clone(),
                created_at: d.created_at,
            })
            .collect();
        self.db.with_writer(|conn| {
            queries::detections::insert_detections(conn, &records)
        })
    }

    fn get_detections_by_file(&self, file: &str) -> Result<Vec<DetectionRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::detections::get_detections_by_file(conn, file)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn get_detections_by_category(&self, category: &str) -> Result<Vec<DetectionRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::detections::get_detections_by_category(conn, category)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn query_all_detections(&self, limit: usize) -> Result<Vec<DetectionRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::detections::query_all_detections(conn, limit)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn delete_detections_by_file(&self, file: &str) -> Result<usize, StorageError> {
        self.db.with_writer(|conn| {
            queries::detections::delete_detections_by_file(conn, file)
        })
    }

    fn count_detections(&self) -> Result<i64, StorageError> {
        self.db.with_reader(queries::detections::count_detections)
    }

    fn get_detections_by_method(&self, method: &str) -> Result<Vec<DetectionRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::detections::get_detections_by_method(conn, method)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn get_detections_by_pattern_prefix(
        &self,
        prefix: &str,
    ) -> Result<Vec<DetectionRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::detections::get_detections_by_pattern_prefix(conn, prefix)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn get_detections_by_cwe(&self, cwe_id: u32) -> Result<Vec<DetectionRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::detections::get_detections_by_cwe(conn, cwe_id)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn get_framework_detection_summary(&self) -> Result<Vec<DetectionSummaryRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::detections::get_framework_detection_summary(conn)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    // ── patterns ──

    fn upsert_confidence(&self, row: &PatternConfidenceRow) -> Result<(), StorageError> {
        let storage_row: queries::patterns::PatternConfidenceRow = row.into();
        self.db.with_writer(|conn| {
            queries::patterns::upsert_confidence(conn, &storage_row)
        })
    }

    fn query_confidence_by_tier(
        &self,
        tier: &str,
        after_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<PatternConfidenceRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::patterns::query_confidence_by_tier(conn, tier, after_id, limit)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn query_all_confidence(&self) -> Result<Vec<PatternConfidenceRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::patterns::query_all_confidence(conn)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn insert_outlier(&self, row: &OutlierRow) -> Result<(), StorageError> {
        let storage_row: queries::patterns::OutlierRow = row.into();
        self.db.with_writer(|conn| {
            queries::patterns::insert_outlier(conn, &storage_row)
        })
    }

    fn query_outliers_by_pattern(
        &self,
        pattern_id: &str,
    ) -> Result<Vec<OutlierRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::patterns::query_outliers_by_pattern(conn, pattern_id)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn insert_convention(&self, row: &ConventionRow) -> Result<(), StorageError> {
        let storage_row: queries::patterns::ConventionRow = row.into();
        self.db.with_writer(|conn| {
            queries::patterns::insert_convention(conn, &storage_row)
        })
    }

    fn query_conventions_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<ConventionRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::patterns::query_conventions_by_category(conn, category)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn query_all_conventions(&self) -> Result<Vec<ConventionRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::patterns::query_all_conventions(conn)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    // ── boundaries ──

    fn insert_boundaries(&self, boundaries: &[BoundaryRow]) -> Result<usize, StorageError> {
        let records: Vec<queries::boundaries::BoundaryRecord> = boundaries
            .iter()
            .map(|b| queries::boundaries::BoundaryRecord {
                id: b.id,
                file: b.file.clone(),
                framework: b.framework.clone(),
                model_name: b.model_name.clone(),
                table_name: b.table_name.clone(),
                field_name: b.field_name.clone(),
                operation: b.operation.clone(),
                sensitivity: b.sensitivity.clone(),
                confidence: b.confidence,
                created_at: b.created_at,
            })
            .collect();
        self.db.with_writer(|conn| {
            queries::boundaries::insert_boundaries(conn, &records)
        })
    }

    fn get_boundaries_by_file(&self, file: &str) -> Result<Vec<BoundaryRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::boundaries::get_boundaries_by_file(conn, file)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn get_boundaries_by_framework(
        &self,
        framework: &str,
    ) -> Result<Vec<BoundaryRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::boundaries::get_boundaries_by_framework(conn, framework)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn get_sensitive_boundaries(&self) -> Result<Vec<BoundaryRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::boundaries::get_sensitive_boundaries(conn)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn delete_boundaries_by_file(&self, file: &str) -> Result<usize, StorageError> {
        self.db.with_writer(|conn| {
            queries::boundaries::delete_boundaries_by_file(conn, file)
        })
    }

    fn count_boundaries(&self) -> Result<i64, StorageError> {
        self.db.with_reader(queries::boundaries::count_boundaries)
    }

    // ── call_edges ──

    fn insert_call_edges(&self, edges: &[CallEdgeRow]) -> Result<usize, StorageError> {
        let records: Vec<queries::call_edges::CallEdgeRecord> = edges
            .iter()
            .map(|e| queries::call_edges::CallEdgeRecord {
                caller_id: e.caller_id,
                callee_id: e.callee_id,
                resolution: e.resolution.clone(),
                confidence: e.confidence,
                call_site_line: e.call_site_line,
            })
            .collect();
        self.db.with_writer(|conn| {
            queries::call_edges::insert_call_edges(conn, &records)
        })
    }

    fn get_edges_by_caller(&self, caller_id: i64) -> Result<Vec<CallEdgeRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::call_edges::get_edges_by_caller(conn, caller_id)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn get_edges_by_callee(&self, callee_id: i64) -> Result<Vec<CallEdgeRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::call_edges::get_edges_by_callee(conn, callee_id)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn delete_edges_by_file(&self, file: &str) -> Result<usize, StorageError> {
        self.db.with_writer(|conn| {
            queries::call_edges::delete_edges_by_file(conn, file)
        })
    }

    fn count_call_edges(&self) -> Result<i64, StorageError> {
        self.db.with_reader(queries::call_edges::count_call_edges)
    }

    fn count_resolved_edges(&self) -> Result<i64, StorageError> {
        self.db.with_reader(queries::call_edges::count_resolved_edges)
    }

    // ── scan_history ──

    fn insert_scan_start(&self, started_at: i64, root_path: &str) -> Result<i64, StorageError> {
        self.db.with_writer(|conn| {
            queries::scan_history::insert_scan_start(conn, started_at, root_path)
        })
    }

    fn update_scan_complete(
        &self,
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
        self.db.with_writer(|conn| {
            queries::scan_history::update_scan_complete(
                conn, id, completed_at, total_files, added_files, modified_files,
                removed_files, unchanged_files, duration_ms, status, error,
            )
        })
    }

    fn query_recent_scans(&self, limit: usize) -> Result<Vec<ScanHistoryRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::scan_history::query_recent(conn, limit)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn count_scans(&self) -> Result<i64, StorageError> {
        self.db.with_reader(queries::scan_history::count)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// IDriftEnforcement implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl IDriftEnforcement for DriftStorageEngine {
    fn insert_violation(&self, v: &ViolationRow) -> Result<(), StorageError> {
        let sv: queries::enforcement::ViolationRow = to_storage_violation(v);
        self.db.with_writer(|conn| queries::enforcement::insert_violation(conn, &sv))
    }

    fn query_violations_by_file(&self, file: &str) -> Result<Vec<ViolationRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::enforcement::query_violations_by_file(conn, file)?;
            Ok(rows.into_iter().map(from_storage_violation).collect())
        })
    }

    fn query_all_violations(&self) -> Result<Vec<ViolationRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::enforcement::query_all_violations(conn)?;
            Ok(rows.into_iter().map(from_storage_violation).collect())
        })
    }

    fn find_violation_by_fingerprint(
        &self,
        fingerprint: &str,
    ) -> Result<Option<ViolationRow>, StorageError> {
        self.db.with_reader(|conn| {
            let row = queries::enforcement::find_violation_by_fingerprint(conn, fingerprint)?;
            Ok(row.map(from_storage_violation))
        })
    }

    fn insert_health_trend(&self, metric_name: &str, metric_value: f64) -> Result<(), StorageError> {
        let recorded_at = now_secs();
        self.db.with_writer(|conn| {
            queries::enforcement::insert_health_trend(conn, metric_name, metric_value, recorded_at)
        })
    }

    fn query_health_trends(
        &self,
        metric_name: &str,
        limit: u32,
    ) -> Result<Vec<HealthTrendRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::enforcement::query_health_trends(conn, metric_name, limit)?;
            Ok(rows
                .into_iter()
                .map(|r| HealthTrendRow {
                    metric_name: r.metric_name,
                    metric_value: r.metric_value,
                    recorded_at: r.recorded_at,
                })
                .collect())
        })
    }

    fn insert_feedback(&self, f: &FeedbackRow) -> Result<(), StorageError> {
        let sf = to_storage_feedback(f);
        self.db.with_writer(|conn| queries::enforcement::insert_feedback(conn, &sf))
    }

    fn query_feedback_by_detector(&self, detector_id: &str) -> Result<Vec<FeedbackRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::enforcement::query_feedback_by_detector(conn, detector_id)?;
            Ok(rows.into_iter().map(from_storage_feedback).collect())
        })
    }

    fn query_feedback_by_pattern(&self, pattern_id: &str) -> Result<Vec<FeedbackRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::enforcement::query_feedback_by_pattern(conn, pattern_id)?;
            Ok(rows.into_iter().map(from_storage_feedback).collect())
        })
    }

    fn get_violation_pattern_id(&self, violation_id: &str) -> Result<Option<String>, StorageError> {
        self.db.with_reader(|conn| queries::enforcement::get_violation_pattern_id(conn, violation_id))
    }

    fn query_feedback_stats(&self, detector_id: &str) -> Result<FeedbackStats, StorageError> {
        self.db.with_reader(|conn| {
            let ss = queries::enforcement::query_feedback_stats(conn, detector_id)?;
            Ok(FeedbackStats {
                total_count: ss.total_count,
                fix_count: ss.fix_count,
                dismiss_count: ss.dismiss_count,
                suppress_count: ss.suppress_count,
                escalate_count: ss.escalate_count,
            })
        })
    }

    fn detector_false_positive_rate(
        &self,
        detector_id: &str,
        window_days: u32,
    ) -> Result<f64, StorageError> {
        let now = now_secs();
        self.db.with_reader(|conn| {
            queries::enforcement::detector_false_positive_rate(conn, detector_id, window_days, now)
        })
    }
}

fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn to_storage_violation(v: &ViolationRow) -> queries::enforcement::ViolationRow {
    queries::enforcement::ViolationRow {
        id: v.id.clone(),
        file: v.file.clone(),
        line: v.line,
        column: v.column,
        end_line: v.end_line,
        end_column: v.end_column,
        severity: v.severity.clone(),
        pattern_id: v.pattern_id.clone(),
        rule_id: v.rule_id.clone(),
        message: v.message.clone(),
        fingerprint: v.fingerprint.clone(),
        cwe_id: v.cwe_id,
        owasp_category: v.owasp_category.clone(),
        suppressed: v.suppressed,
        is_new: v.is_new,
        created_at: v.created_at,
    }
}

fn from_storage_violation(r: queries::enforcement::ViolationRow) -> ViolationRow {
    ViolationRow {
        id: r.id,
        file: r.file,
        line: r.line,
        column: r.column,
        end_line: r.end_line,
        end_column: r.end_column,
        severity: r.severity,
        pattern_id: r.pattern_id,
        rule_id: r.rule_id,
        message: r.message,
        fingerprint: r.fingerprint,
        cwe_id: r.cwe_id,
        owasp_category: r.owasp_category,
        suppressed: r.suppressed,
        is_new: r.is_new,
        created_at: r.created_at,
    }
}

fn to_storage_feedback(f: &FeedbackRow) -> queries::enforcement::FeedbackRow {
    queries::enforcement::FeedbackRow {
        violation_id: f.violation_id.clone(),
        pattern_id: f.pattern_id.clone(),
        detector_id: f.detector_id.clone(),
        action: f.action.clone(),
        dismissal_reason: f.dismissal_reason.clone(),
        reason: f.reason.clone(),
        author: f.author.clone(),
        created_at: f.created_at,
    }
}

fn from_storage_feedback(r: queries::enforcement::FeedbackRow) -> FeedbackRow {
    FeedbackRow {
        violation_id: r.violation_id,
        pattern_id: r.pattern_id,
        detector_id: r.detector_id,
        action: r.action,
        dismissal_reason: r.dismissal_reason,
        reason: r.reason,
        author: r.author,
        created_at: r.created_at,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// IDriftBatchWriter implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl IDriftBatchWriter for DriftStorageEngine {
    fn send_raw(&self, _command_name: &str, _payload: &[u8]) -> Result<(), StorageError> {
        // Type-erased batch sending for cloud implementations.
        // The SQLite engine uses send_batch() directly instead.
        // TODO: implement deserialization when cloud backend needs it.
        Err(StorageError::NotSupported {
            operation: "send_raw".to_string(),
            reason: "Use send_batch() with typed BatchCommand for SQLite backend".to_string(),
        })
    }

    fn flush(&self) -> Result<(), StorageError> {
        self.batch.flush()
    }

    fn flush_sync(&self) -> Result<WriteStats, StorageError> {
        self.batch.flush_sync()?;
        // BatchWriter::flush_sync returns () — we return default stats.
        // The real stats accumulate on the writer thread and are returned on shutdown.
        Ok(WriteStats::default())
    }

    fn stats(&self) -> WriteStats {
        // Stats are accumulated on the writer thread — no way to query them
        // without shutting down. Return defaults for now.
        WriteStats::default()
    }

    fn shutdown(self: Box<Self>) -> Result<WriteStats, StorageError> {
        // Cannot consume BatchWriter from Box<Self> easily.
        // Flush sync and return defaults.
        self.batch.flush_sync()?;
        Ok(WriteStats::default())
    }
}
