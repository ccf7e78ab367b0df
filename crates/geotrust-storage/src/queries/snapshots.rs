//! Queries for the snapshots table (append-only).

use geotrust_core::errors::StorageError;
use geotrust_core::models::{HealthStatus, Snapshot};
use rusqlite::{params, Connection, Row};

use super::util::{from_epoch, parse_text, sqlite_err, to_count, to_epoch};

/// Append a snapshot. Returns the row id.
pub fn append_snapshot(conn: &Connection, snapshot: &Snapshot) -> Result<i64, StorageError> {
    conn.prepare_cached(
        "INSERT INTO snapshots
            (run_id, timestamp, system_health, verification_rate, total_violations, transaction_count)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .map_err(sqlite_err)?
    .execute(params![
        snapshot.run_id,
        to_epoch(&snapshot.timestamp),
        snapshot.system_health.as_str(),
        snapshot.verification_rate,
        snapshot.total_violations as i64,
        snapshot.transaction_count as i64,
    ])
    .map_err(sqlite_err)?;
    Ok(conn.last_insert_rowid())
}

/// Most recent first. Ties on timestamp break by insertion order.
pub fn recent_snapshots(conn: &Connection, limit: usize) -> Result<Vec<Snapshot>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT run_id, timestamp, system_health, verification_rate, total_violations,
                    transaction_count
             FROM snapshots ORDER BY timestamp DESC, id DESC LIMIT ?1",
        )
        .map_err(sqlite_err)?;
    let rows = stmt
        .query_map(params![limit as i64], map_snapshot)
        .map_err(sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)
}

fn map_snapshot(row: &Row<'_>) -> rusqlite::Result<Snapshot> {
    let health: String = row.get(2)?;
    Ok(Snapshot {
        run_id: row.get(0)?,
        timestamp: from_epoch(1, row.get(1)?)?,
        system_health: parse_text::<HealthStatus>(2, &health)?,
        verification_rate: row.get(3)?,
        total_violations: to_count(4, row.get(4)?)?,
        transaction_count: to_count(5, row.get(5)?)?,
    })
}
