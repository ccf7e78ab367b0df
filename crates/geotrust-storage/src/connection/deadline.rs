//! Hard per-query deadlines.
//!
//! SQLite's progress handler runs every `PROGRESS_OPS` virtual-machine
//! instructions; returning true interrupts the running statement with
//! `SQLITE_INTERRUPT`, which surfaces as [`StorageError::Timeout`].

use std::time::{Duration, Instant};

use geotrust_core::errors::StorageError;
use geotrust_core::tracing::fields;
use rusqlite::Connection;

const PROGRESS_OPS: i32 = 1_000;

/// Run `f` on `conn` and interrupt it once `timeout` has elapsed.
pub fn with_deadline<T, F>(
    conn: &Connection,
    operation: &str,
    timeout: Duration,
    f: F,
) -> Result<T, StorageError>
where
    F: FnOnce(&Connection) -> Result<T, StorageError>,
{
    let start = Instant::now();
    let deadline = start + timeout;
    conn.progress_handler(PROGRESS_OPS, Some(move || Instant::now() >= deadline));
    let result = f(conn);
    conn.progress_handler(PROGRESS_OPS, None::<fn() -> bool>);
    tracing::trace!(
        operation,
        { fields::QUERY_DURATION_MS } = start.elapsed().as_millis() as u64,
        "query finished"
    );

    match result {
        Err(e) if e.is_timeout() => {
            tracing::warn!(operation, timeout_ms = timeout.as_millis() as u64, "query deadline exceeded");
            Err(StorageError::Timeout {
                operation: operation.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            })
        }
        other => other,
    }
}
