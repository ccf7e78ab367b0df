//! Queries for the tickets table.

use chrono::{DateTime, NaiveDate, Utc};
use geotrust_core::errors::StorageError;
use geotrust_core::models::{Ticket, TicketReason, TicketStatus};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::util::{day_from_text, day_to_text, from_epoch, parse_text, sqlite_err, to_count, to_epoch};

const TICKET_COLUMNS: &str = "store_id, day, created_at, reason, transaction_count, \
     sample_transaction_ids, municipality, status, resolved_at, document";

/// Insert unless a ticket for `(store_id, day)` exists. Returns true if inserted.
pub fn create_ticket_if_absent(conn: &Connection, ticket: &Ticket) -> Result<bool, StorageError> {
    let samples = serde_json::to_string(&ticket.sample_transaction_ids).map_err(|e| {
        StorageError::InvalidRow {
            table: "tickets".to_string(),
            message: e.to_string(),
        }
    })?;
    let changed = conn
        .prepare_cached(
            "INSERT OR IGNORE INTO tickets
                (store_id, day, created_at, reason, transaction_count, sample_transaction_ids,
                 municipality, status, resolved_at, document)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )
        .map_err(sqlite_err)?
        .execute(params![
            ticket.store_id,
            day_to_text(ticket.day),
            to_epoch(&ticket.created_at),
            ticket.reason.as_str(),
            ticket.transaction_count as i64,
            samples,
            ticket.municipality,
            ticket.status.as_str(),
            ticket.resolved_at.as_ref().map(to_epoch),
            ticket.document,
        ])
        .map_err(sqlite_err)?;
    Ok(changed == 1)
}

pub fn get_ticket(
    conn: &Connection,
    store_id: i64,
    day: NaiveDate,
) -> Result<Option<Ticket>, StorageError> {
    let sql = format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE store_id = ?1 AND day = ?2");
    let mut stmt = conn.prepare_cached(&sql).map_err(sqlite_err)?;
    stmt.query_row(params![store_id, day_to_text(day)], map_ticket)
        .optional()
        .map_err(sqlite_err)
}

/// Open tickets ordered by `(day, store_id)`.
pub fn open_tickets(conn: &Connection) -> Result<Vec<Ticket>, StorageError> {
    let sql = format!(
        "SELECT {TICKET_COLUMNS} FROM tickets WHERE status = 'open' ORDER BY day, store_id"
    );
    let mut stmt = conn.prepare_cached(&sql).map_err(sqlite_err)?;
    let rows = stmt.query_map([], map_ticket).map_err(sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)
}

/// Mark an open ticket resolved. Returns false if no open ticket matched.
pub fn resolve_ticket(
    conn: &Connection,
    store_id: i64,
    day: NaiveDate,
    resolved_at: DateTime<Utc>,
) -> Result<bool, StorageError> {
    let changed = conn
        .prepare_cached(
            "UPDATE tickets SET status = 'resolved', resolved_at = ?3
             WHERE store_id = ?1 AND day = ?2 AND status = 'open'",
        )
        .map_err(sqlite_err)?
        .execute(params![store_id, day_to_text(day), to_epoch(&resolved_at)])
        .map_err(sqlite_err)?;
    Ok(changed == 1)
}

fn map_ticket(row: &Row<'_>) -> rusqlite::Result<Ticket> {
    let day: String = row.get(1)?;
    let reason: String = row.get(3)?;
    let samples: String = row.get(5)?;
    let status: String = row.get(7)?;
    let resolved_at: Option<i64> = row.get(8)?;
    Ok(Ticket {
        store_id: row.get(0)?,
        day: day_from_text(1, &day)?,
        created_at: from_epoch(2, row.get(2)?)?,
        reason: parse_text::<TicketReason>(3, &reason)?,
        transaction_count: to_count(4, row.get(4)?)?,
        sample_transaction_ids: serde_json::from_str(&samples)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?,
        municipality: row.get(6)?,
        status: parse_text::<TicketStatus>(7, &status)?,
        resolved_at: resolved_at.map(|secs| from_epoch(8, secs)).transpose()?,
        document: row.get(9)?,
    })
}
