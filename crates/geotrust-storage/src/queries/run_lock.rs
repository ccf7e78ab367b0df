//! Queries for the single-row run_lock table.

use geotrust_core::errors::StorageError;
use geotrust_core::models::RunLock;
use rusqlite::{params, Connection, OptionalExtension};

use super::util::{from_epoch, sqlite_err, to_epoch};

pub fn current_lock(conn: &Connection) -> Result<Option<RunLock>, StorageError> {
    conn.prepare_cached("SELECT holder, acquired_at FROM run_lock WHERE id = 1")
        .map_err(sqlite_err)?
        .query_row([], |row| {
            Ok(RunLock {
                holder: row.get(0)?,
                acquired_at: from_epoch(1, row.get(1)?)?,
            })
        })
        .optional()
        .map_err(sqlite_err)
}

/// Take the marker if it is free. Returns true if acquired.
pub fn try_acquire(conn: &Connection, lock: &RunLock) -> Result<bool, StorageError> {
    let changed = conn
        .prepare_cached("INSERT OR IGNORE INTO run_lock (id, holder, acquired_at) VALUES (1, ?1, ?2)")
        .map_err(sqlite_err)?
        .execute(params![lock.holder, to_epoch(&lock.acquired_at)])
        .map_err(sqlite_err)?;
    Ok(changed == 1)
}

/// Compare-and-delete: clears only the exact marker observed by the caller.
pub fn clear_if_matches(conn: &Connection, expected: &RunLock) -> Result<bool, StorageError> {
    let changed = conn
        .prepare_cached("DELETE FROM run_lock WHERE id = 1 AND holder = ?1 AND acquired_at = ?2")
        .map_err(sqlite_err)?
        .execute(params![expected.holder, to_epoch(&expected.acquired_at)])
        .map_err(sqlite_err)?;
    Ok(changed == 1)
}

pub fn release(conn: &Connection, holder: &str) -> Result<bool, StorageError> {
    let changed = conn
        .prepare_cached("DELETE FROM run_lock WHERE id = 1 AND holder = ?1")
        .map_err(sqlite_err)?
        .execute(params![holder])
        .map_err(sqlite_err)?;
    Ok(changed == 1)
}
