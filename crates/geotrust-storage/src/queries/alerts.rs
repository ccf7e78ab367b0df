//! Queries for the alerts table.

use chrono::NaiveDate;
use geotrust_core::errors::StorageError;
use geotrust_core::models::{Alert, Severity};
use rusqlite::{params, Connection, Row};

use super::util::{day_from_text, day_to_text, from_epoch, parse_text, sqlite_err, to_epoch};

/// Insert unless an alert with the same `dedup_key` exists. Returns true if inserted.
pub fn insert_alert_if_absent(conn: &Connection, alert: &Alert) -> Result<bool, StorageError> {
    let changed = conn
        .prepare_cached(
            "INSERT OR IGNORE INTO alerts
                (id, dedup_key, category, name, message, severity, day, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .map_err(sqlite_err)?
        .execute(params![
            alert.id,
            alert.dedup_key,
            alert.category,
            alert.name,
            alert.message,
            alert.severity.as_str(),
            day_to_text(alert.day),
            to_epoch(&alert.created_at),
        ])
        .map_err(sqlite_err)?;
    Ok(changed == 1)
}

pub fn alerts_for_day(conn: &Connection, day: NaiveDate) -> Result<Vec<Alert>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, dedup_key, category, name, message, severity, day, created_at
             FROM alerts WHERE day = ?1 ORDER BY created_at, id",
        )
        .map_err(sqlite_err)?;
    let rows = stmt
        .query_map(params![day_to_text(day)], map_alert)
        .map_err(sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)
}

fn map_alert(row: &Row<'_>) -> rusqlite::Result<Alert> {
    let severity: String = row.get(5)?;
    let day: String = row.get(6)?;
    Ok(Alert {
        id: row.get(0)?,
        dedup_key: row.get(1)?,
        category: row.get(2)?,
        name: row.get(3)?,
        message: row.get(4)?,
        severity: parse_text::<Severity>(5, &severity)?,
        day: day_from_text(6, &day)?,
        created_at: from_epoch(7, row.get(7)?)?,
    })
}
