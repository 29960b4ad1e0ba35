//! `DatabaseManager` — read/write connection routing for `drift.db` (§4.2).
//!
//! Exactly one writer connection, protected by a mutex, and a fixed-size
//! pool of reader connections with a round-robin dispatcher. Readers set
//! `query_only=ON`. In-memory mode routes readers through the writer since
//! separate in-memory connections are independent databases.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use drift_core::errors::StorageError;
use rusqlite::Connection;

use crate::migrations;

const READER_POOL_SIZE: usize = 4;
const BUSY_TIMEOUT_MS: u32 = 5_000;
const MMAP_SIZE_BYTES: i64 = 256 * 1024 * 1024;
const PAGE_CACHE_KIB: i64 = -64 * 1024;

/// Owns the single writer connection and a reader pool for one `drift.db`.
///
/// The writer connection is `Arc`-shared rather than owned exclusively so
/// that `BatchWriter`'s dedicated writer thread can lock the very same
/// connection per-transaction instead of opening a second one — there is
/// exactly one writer connection for the whole engine (§4.2).
pub struct DatabaseManager {
    writer: Arc<Mutex<Connection>>,
    readers: Vec<Mutex<Connection>>,
    next_reader: AtomicUsize,
    path: Option<PathBuf>,
    in_memory: bool,
}

impl DatabaseManager {
    /// Open (or create) the database file at `path`, applying pragmas and
    /// running pending migrations.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let writer = Connection::open(path).map_err(sqe)?;
        configure_writer(&writer)?;
        migrations::run(&writer)?;

        let mut readers = Vec::with_capacity(READER_POOL_SIZE);
        for _ in 0..READER_POOL_SIZE {
            let reader = Connection::open(path).map_err(sqe)?;
            configure_reader(&reader)?;
            readers.push(Mutex::new(reader));
        }

        Ok(Self {
            writer: Arc::new(Mutex::new(writer)),
            readers,
            next_reader: AtomicUsize::new(0),
            path: Some(path.to_path_buf()),
            in_memory: false,
        })
    }

    /// Open a private in-memory database, used by tests. Readers route
    /// through the writer connection since `:memory:` connections do not
    /// share state.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let writer = Connection::open_in_memory().map_err(sqe)?;
        configure_writer(&writer)?;
        migrations::run(&writer)?;

        Ok(Self {
            writer: Arc::new(Mutex::new(writer)),
            readers: Vec::new(),
            next_reader: AtomicUsize::new(0),
            path: None,
            in_memory: true,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run `f` against a reader connection (or the writer, in in-memory mode).
    pub fn with_reader<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        if self.in_memory || self.readers.is_empty() {
            let conn = self.writer.lock().map_err(|_| poisoned())?;
            return f(&conn);
        }
        let idx = self.next_reader.fetch_add(1, Ordering::Relaxed) % self.readers.len();
        let conn = self.readers[idx].lock().map_err(|_| poisoned())?;
        f(&conn)
    }

    /// Run `f` against the single writer connection.
    pub fn with_writer<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let conn = self.writer.lock().map_err(|_| poisoned())?;
        f(&conn)
    }

    /// Issue a WAL checkpoint, optionally followed by `incremental_vacuum`.
    pub fn checkpoint(&self, truncate: bool) -> Result<(), StorageError> {
        self.with_writer(|conn| {
            let mode = if truncate { "TRUNCATE" } else { "PASSIVE" };
            conn.pragma_update(None, "wal_checkpoint", mode).map_err(sqe)
        })
    }

    /// Clone of the `Arc` around the single writer connection, handed to
    /// `BatchWriter` so its dedicated thread locks the same connection the
    /// rest of the engine writes through via `with_writer()` rather than
    /// opening a second one.
    pub fn writer_handle(&self) -> Arc<Mutex<Connection>> {
        Arc::clone(&self.writer)
    }
}

fn configure_writer(conn: &Connection) -> Result<(), StorageError> {
    // Must precede table creation: auto_vacuum only takes effect on an empty database.
    conn.pragma_update(None, "auto_vacuum", "INCREMENTAL").map_err(sqe)?;
    conn.pragma_update(None, "journal_mode", "WAL").map_err(sqe)?;
    conn.pragma_update(None, "synchronous", "NORMAL").map_err(sqe)?;
    conn.pragma_update(None, "foreign_keys", "ON").map_err(sqe)?;
    conn.pragma_update(None, "busy_timeout", BUSY_TIMEOUT_MS).map_err(sqe)?;
    conn.pragma_update(None, "mmap_size", MMAP_SIZE_BYTES).map_err(sqe)?;
    conn.pragma_update(None, "cache_size", PAGE_CACHE_KIB).map_err(sqe)?;
    Ok(())
}

fn configure_reader(conn: &Connection) -> Result<(), StorageError> {
    conn.pragma_update(None, "busy_timeout", BUSY_TIMEOUT_MS).map_err(sqe)?;
    conn.pragma_update(None, "query_only", "ON").map_err(sqe)?;
    Ok(())
}

fn poisoned() -> StorageError {
    StorageError::SqliteError { message: "connection mutex poisoned".to_string() }
}

fn sqe(e: impl std::fmt::Display) -> StorageError {
    StorageError::SqliteError { message: e.to_string() }
}
