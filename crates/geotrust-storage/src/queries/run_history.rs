//! Queries for the run_history table: append-only log of pipeline runs.

use geotrust_core::errors::StorageError;
use geotrust_core::models::{RunHistoryRecord, RunStatus};
use rusqlite::{params, Connection, Row};

use super::util::{from_epoch, parse_text, sqlite_err, to_epoch};

pub fn record_run(conn: &Connection, record: &RunHistoryRecord) -> Result<(), StorageError> {
    conn.prepare_cached(
        "INSERT INTO run_history
            (run_id, started_at, finished_at, status, final_state, worst_stage, reason)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .map_err(sqlite_err)?
    .execute(params![
        record.run_id,
        to_epoch(&record.started_at),
        to_epoch(&record.finished_at),
        record.status.as_str(),
        record.final_state,
        record.worst_stage,
        record.reason,
    ])
    .map_err(sqlite_err)?;
    Ok(())
}

/// Query recent runs, newest first.
pub fn recent_runs(conn: &Connection, limit: usize) -> Result<Vec<RunHistoryRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT run_id, started_at, finished_at, status, final_state, worst_stage, reason
             FROM run_history ORDER BY started_at DESC, rowid DESC LIMIT ?1",
        )
        .map_err(sqlite_err)?;
    let rows = stmt
        .query_map(params![limit as i64], map_run)
        .map_err(sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)
}

fn map_run(row: &Row<'_>) -> rusqlite::Result<RunHistoryRecord> {
    let status: String = row.get(3)?;
    Ok(RunHistoryRecord {
        run_id: row.get(0)?,
        started_at: from_epoch(1, row.get(1)?)?,
        finished_at: from_epoch(2, row.get(2)?)?,
        status: parse_text::<RunStatus>(3, &status)?,
        final_state: row.get(4)?,
        worst_stage: row.get(5)?,
        reason: row.get(6)?,
    })
}
