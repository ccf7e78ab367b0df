//! Connection management: write-serialized + read-pooled, with a hard
//! deadline on every operation.

pub mod deadline;
pub mod pool;
pub mod pragmas;

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use geotrust_core::config::StorageConfig;
use geotrust_core::errors::StorageError;
use rusqlite::Connection;

use self::deadline::with_deadline;
use self::pool::ReadPool;
use self::pragmas::apply_pragmas;
use crate::migrations;
use crate::queries::util::sqlite_err;

/// Manages the single write connection and the read connection pool.
///
/// In-memory databases cannot be shared across connections, so they have no
/// read pool and reads go through the writer.
pub struct DatabaseManager {
    writer: Mutex<Connection>,
    readers: Option<ReadPool>,
    path: Option<PathBuf>,
    query_timeout: Duration,
}

impl DatabaseManager {
    /// Open a database at the given path, apply pragmas, run migrations.
    pub fn open(path: &Path, config: &StorageConfig) -> Result<Self, StorageError> {
        let writer = Connection::open(path).map_err(|e| StorageError::SqliteError {
            message: format!("open {}: {e}", path.display()),
        })?;
        apply_pragmas(&writer, config.effective_busy_timeout())?;
        migrations::run_migrations(&writer)?;

        let readers = ReadPool::open(
            path,
            config.effective_read_pool_size(),
            config.effective_busy_timeout(),
        )?;

        tracing::debug!(path = %path.display(), readers = readers.size(), "database opened");

        Ok(Self {
            writer: Mutex::new(writer),
            readers: Some(readers),
            path: Some(path.to_path_buf()),
            query_timeout: config.effective_query_timeout(),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::open_in_memory_with(&StorageConfig::default())
    }

    pub fn open_in_memory_with(config: &StorageConfig) -> Result<Self, StorageError> {
        let writer = Connection::open_in_memory().map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
        apply_pragmas(&writer, config.effective_busy_timeout())?;
        migrations::run_migrations(&writer)?;

        Ok(Self {
            writer: Mutex::new(writer),
            readers: None,
            path: None,
            query_timeout: config.effective_query_timeout(),
        })
    }

    /// Execute a write operation on the serialized writer, under the query deadline.
    pub fn with_writer<F, T>(&self, operation: &str, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let guard = self.writer.lock().map_err(|_| StorageError::SqliteError {
            message: "write lock poisoned".to_string(),
        })?;
        with_deadline(&guard, operation, self.query_timeout, f)
    }

    /// Execute a read operation on a pooled connection, under the query deadline.
    pub fn with_reader<F, T>(&self, operation: &str, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        match &self.readers {
            Some(pool) => {
                let timeout = self.query_timeout;
                pool.with_conn(|conn| with_deadline(conn, operation, timeout, f))
            }
            None => self.with_writer(operation, f),
        }
    }

    /// Cheap round trip on the writer.
    pub fn ping(&self) -> Result<(), StorageError> {
        self.with_writer("ping", |conn| {
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
                .map(|_| ())
                .map_err(sqlite_err)
        })
    }

    /// Run a WAL checkpoint (TRUNCATE mode). Readers still holding a
    /// snapshot make SQLite skip part of the log; that is logged, not an error.
    pub fn checkpoint(&self) -> Result<(), StorageError> {
        let busy = self.with_writer("checkpoint", |conn| {
            conn.query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |row| row.get::<_, i64>(0))
                .map_err(sqlite_err)
        })?;
        if busy != 0 {
            tracing::debug!("wal checkpoint incomplete: readers still active");
        }
        Ok(())
    }

    /// Get the database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
