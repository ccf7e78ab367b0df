//! Queries for the stores table (the registry).

use geotrust_core::errors::StorageError;
use geotrust_core::models::StoreRecord;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::util::{from_epoch, sqlite_err, to_epoch};

const STORE_COLUMNS: &str = "store_id, store_name, municipality, barangay, latitude, longitude, created_at, updated_at";

/// Insert or update a store by `store_id`. An existing row keeps its
/// `created_at`; everything else is replaced.
pub fn upsert_store(conn: &Connection, store: &StoreRecord) -> Result<(), StorageError> {
    conn.prepare_cached(
        "INSERT INTO stores
            (store_id, store_name, municipality, barangay, latitude, longitude, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
         ON CONFLICT(store_id) DO UPDATE SET
            store_name = excluded.store_name,
            municipality = excluded.municipality,
            barangay = excluded.barangay,
            latitude = excluded.latitude,
            longitude = excluded.longitude,
            updated_at = excluded.updated_at",
    )
    .map_err(sqlite_err)?
    .execute(params![
        store.store_id,
        store.store_name,
        store.municipality,
        store.barangay,
        store.latitude,
        store.longitude,
        to_epoch(&store.created_at),
        to_epoch(&store.updated_at),
    ])
    .map_err(sqlite_err)?;
    Ok(())
}

pub fn get_store(conn: &Connection, store_id: i64) -> Result<Option<StoreRecord>, StorageError> {
    let sql = format!("SELECT {STORE_COLUMNS} FROM stores WHERE store_id = ?1");
    let mut stmt = conn.prepare_cached(&sql).map_err(sqlite_err)?;
    stmt.query_row(params![store_id], map_store)
        .optional()
        .map_err(sqlite_err)
}

/// All stores ordered by `store_id`.
pub fn list_stores(conn: &Connection) -> Result<Vec<StoreRecord>, StorageError> {
    let sql = format!("SELECT {STORE_COLUMNS} FROM stores ORDER BY store_id");
    let mut stmt = conn.prepare_cached(&sql).map_err(sqlite_err)?;
    let rows = stmt.query_map([], map_store).map_err(sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)
}

fn map_store(row: &Row<'_>) -> rusqlite::Result<StoreRecord> {
    Ok(StoreRecord {
        store_id: row.get(0)?,
        store_name: row.get(1)?,
        municipality: row.get(2)?,
        barangay: row.get(3)?,
        latitude: row.get(4)?,
        longitude: row.get(5)?,
        created_at: from_epoch(6, row.get(6)?)?,
        updated_at: from_epoch(7, row.get(7)?)?,
    })
}
