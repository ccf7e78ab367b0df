//! Queries for the transactions table. The pipeline only reads; the insert
//! functions serve the ingestion collaborator and test fixtures.

use geotrust_core::errors::StorageError;
use geotrust_core::models::TransactionRecord;
use rusqlite::{params, Connection, Row};

use super::util::{from_epoch, sqlite_err, to_epoch, to_u32};

/// All transactions ordered by `transaction_id`.
pub fn list_transactions(conn: &Connection) -> Result<Vec<TransactionRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT transaction_id, store_id, claimed_municipality, claimed_verified_flag,
                    basket_item_count, timestamp
             FROM transactions ORDER BY transaction_id",
        )
        .map_err(sqlite_err)?;
    let rows = stmt.query_map([], map_transaction).map_err(sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)
}

/// Insert a batch in one transaction. Existing ids are left untouched.
/// Returns the number of rows inserted.
pub fn insert_transactions(
    conn: &Connection,
    records: &[TransactionRecord],
) -> Result<usize, StorageError> {
    let tx = conn.unchecked_transaction().map_err(sqlite_err)?;
    let mut inserted = 0;
    {
        let mut stmt = tx
            .prepare_cached(
                "INSERT OR IGNORE INTO transactions
                    (transaction_id, store_id, claimed_municipality, claimed_verified_flag,
                     basket_item_count, timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )
            .map_err(sqlite_err)?;
        for record in records {
            inserted += stmt
                .execute(params![
                    record.transaction_id,
                    record.store_id,
                    record.claimed_municipality,
                    record.claimed_verified_flag,
                    i64::from(record.basket_item_count),
                    to_epoch(&record.timestamp),
                ])
                .map_err(sqlite_err)?;
        }
    }
    tx.commit().map_err(sqlite_err)?;
    Ok(inserted)
}

fn map_transaction(row: &Row<'_>) -> rusqlite::Result<TransactionRecord> {
    Ok(TransactionRecord {
        transaction_id: row.get(0)?,
        store_id: row.get(1)?,
        claimed_municipality: row.get(2)?,
        claimed_verified_flag: row.get(3)?,
        basket_item_count: to_u32(4, row.get(4)?)?,
        timestamp: from_epoch(5, row.get(5)?)?,
    })
}
