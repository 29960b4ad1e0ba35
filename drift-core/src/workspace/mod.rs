//! Workspace management — project lifecycle orchestrator.
//!
//! This is the first thing that runs on every analysis entry point: without
//! it there is no `.drift/` directory, no `drift.db`, no project context.
//!
//! ## Components
//! - **init** — Workspace initialization (`.drift/`, `drift.db`, `drift.toml`)
//! - **migration** — Schema migration via `PRAGMA user_version`
//! - **lock** — Workspace locking via `fd-lock` for concurrent access safety
//! - **project** — Multi-project switching with health indicators
//! - **context** — Event-driven context refresh (zero staleness)
//! - **detect** — Language and framework auto-detection
//! - **status** — Comprehensive workspace status
//! - **integrity** — Workspace integrity check and recovery
//! - **gc** — Retention-driven garbage collection (age/count trim, vacuum)
//! - **destructive** — Destructive operation safety (confirmation gating)
//! - **export** — Workspace export/import for portability
//!
//! Backup scripting, monorepo partitioning, and CI-environment detection are
//! external-collaborator concerns and are not part of this crate.

pub mod context;
pub mod destructive;
pub mod detect;
pub mod errors;
pub mod export;
pub mod gc;
pub mod init;
pub mod integrity;
pub mod lock;
pub mod migration;
pub mod project;
pub mod sqlite_storage;
pub mod status;

// Re-export the most commonly used types.
pub use sqlite_storage::SqliteWorkspaceStorage;
pub use context::{get_agent_context, get_workspace_context, refresh_workspace_context};
pub use errors::{WorkspaceError, WorkspaceResult};
pub use gc::{garbage_collect, GCOptions, GCReport};
pub use init::{is_initialized, open_workspace, workspace_init, InitOptions, WorkspaceInfo};
pub use integrity::{auto_recover, verify_workspace, IntegrityReport};
pub use lock::WorkspaceLock;
pub use migration::{get_schema_version, initialize_workspace_db};
pub use project::{
    format_project_header, format_project_indicator, get_active_project, list_projects,
    resolve_project, switch_project, HealthStatus, ProjectInfo,
};
pub use status::{workspace_status, DiskUsage, WorkspaceStatus};
