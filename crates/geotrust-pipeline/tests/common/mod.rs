//! Shared fixtures for pipeline tests.
#![allow(dead_code)]

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use geotrust_core::errors::StorageError;
use geotrust_core::models::{
    Alert, RunHistoryRecord, RunInput, RunLock, Snapshot, StoreRecord, Ticket,
    TransactionRecord,
};
use geotrust_core::traits::{
    AlertRepository, HealthProbe, RunHistoryRepository, RunLockRepository, SnapshotRepository,
    StoreRepository, TicketRepository, TransactionRepository,
};
use geotrust_storage::StorageEngine;

/// 2025-03-01 at the given hour, UTC.
pub fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, hour, 0, 0).unwrap()
}

pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
}

pub fn store(id: i64, municipality: &str) -> StoreRecord {
    store_at(id, municipality, 14.6, 121.0)
}

pub fn store_at(id: i64, municipality: &str, latitude: f64, longitude: f64) -> StoreRecord {
    StoreRecord {
        store_id: id,
        store_name: format!("Store {id}"),
        municipality: municipality.to_string(),
        barangay: "Barangay 1".to_string(),
        latitude,
        longitude,
        created_at: at(0),
        updated_at: at(0),
    }
}

pub fn txn(id: &str, store_id: Option<i64>, municipality: &str) -> TransactionRecord {
    TransactionRecord {
        transaction_id: id.to_string(),
        store_id,
        claimed_municipality: municipality.to_string(),
        claimed_verified_flag: false,
        basket_item_count: 3,
        timestamp: at(6),
    }
}

/// `count` transactions for one store, ids `{prefix}-000`, `{prefix}-001`, ...
pub fn txns(prefix: &str, count: usize, store_id: Option<i64>, municipality: &str) -> Vec<TransactionRecord> {
    (0..count)
        .map(|i| txn(&format!("{prefix}-{i:03}"), store_id, municipality))
        .collect()
}

pub fn engine_with(stores: &[StoreRecord], transactions: &[TransactionRecord]) -> StorageEngine {
    let engine = StorageEngine::open_in_memory().unwrap();
    for s in stores {
        engine.upsert_store(s).unwrap();
    }
    engine.ingest_transactions(transactions).unwrap();
    engine
}

fn injected(what: &str) -> StorageError {
    StorageError::SqliteError {
        message: format!("injected {what} failure"),
    }
}

/// Which operations a [`FaultyStore`] fails.
#[derive(Debug, Default, Clone)]
pub struct Faults {
    pub ping: bool,
    pub transactions: bool,
    pub snapshots: bool,
    pub alerts: bool,
    pub checkpoint: bool,
    pub ticket_stores: HashSet<i64>,
}

/// Delegates to a real engine, failing the operations named in `faults`.
pub struct FaultyStore {
    pub inner: StorageEngine,
    pub faults: Faults,
}

impl FaultyStore {
    pub fn new(inner: StorageEngine, faults: Faults) -> Self {
        Self { inner, faults }
    }
}

impl StoreRepository for FaultyStore {
    fn upsert_store(&self, store: &StoreRecord) -> Result<StoreRecord, StorageError> {
        self.inner.upsert_store(store)
    }
    fn get_store(&self, store_id: i64) -> Result<Option<StoreRecord>, StorageError> {
        self.inner.get_store(store_id)
    }
    fn list_stores(&self) -> Result<Vec<StoreRecord>, StorageError> {
        self.inner.list_stores()
    }
}

impl TransactionRepository for FaultyStore {
    fn list_transactions(&self) -> Result<Vec<TransactionRecord>, StorageError> {
        if self.faults.transactions {
            return Err(StorageError::Timeout {
                operation: "list_transactions".to_string(),
                timeout_ms: 10,
            });
        }
        self.inner.list_transactions()
    }
    fn load_run_input(&self) -> Result<RunInput, StorageError> {
        if self.faults.transactions {
            return Err(StorageError::Timeout {
                operation: "load_run_input".to_string(),
                timeout_ms: 10,
            });
        }
        self.inner.load_run_input()
    }
}

impl AlertRepository for FaultyStore {
    fn insert_alert_if_absent(&self, alert: &Alert) -> Result<bool, StorageError> {
        if self.faults.alerts {
            return Err(injected("alert"));
        }
        self.inner.insert_alert_if_absent(alert)
    }
    fn alerts_for_day(&self, day: NaiveDate) -> Result<Vec<Alert>, StorageError> {
        self.inner.alerts_for_day(day)
    }
}

impl TicketRepository for FaultyStore {
    fn create_ticket_if_absent(&self, ticket: &Ticket) -> Result<bool, StorageError> {
        if self.faults.ticket_stores.contains(&ticket.store_id) {
            return Err(injected("ticket"));
        }
        self.inner.create_ticket_if_absent(ticket)
    }
    fn get_ticket(&self, store_id: i64, day: NaiveDate) -> Result<Option<Ticket>, StorageError> {
        self.inner.get_ticket(store_id, day)
    }
    fn open_tickets(&self) -> Result<Vec<Ticket>, StorageError> {
        self.inner.open_tickets()
    }
    fn resolve_ticket(
        &self,
        store_id: i64,
        day: NaiveDate,
        resolved_at: DateTime<Utc>,
    ) -> Result<bool, StorageError> {
        self.inner.resolve_ticket(store_id, day, resolved_at)
    }
}

impl SnapshotRepository for FaultyStore {
    fn append_snapshot(&self, snapshot: &Snapshot) -> Result<i64, StorageError> {
        if self.faults.snapshots {
            return Err(injected("snapshot"));
        }
        self.inner.append_snapshot(snapshot)
    }
    fn recent_snapshots(&self, limit: usize) -> Result<Vec<Snapshot>, StorageError> {
        self.inner.recent_snapshots(limit)
    }
}

impl RunLockRepository for FaultyStore {
    fn current_lock(&self) -> Result<Option<RunLock>, StorageError> {
        self.inner.current_lock()
    }
    fn try_acquire_lock(&self, lock: &RunLock) -> Result<bool, StorageError> {
        self.inner.try_acquire_lock(lock)
    }
    fn clear_lock(&self, expected: &RunLock) -> Result<bool, StorageError> {
        self.inner.clear_lock(expected)
    }
    fn release_lock(&self, holder: &str) -> Result<bool, StorageError> {
        self.inner.release_lock(holder)
    }
}

impl RunHistoryRepository for FaultyStore {
    fn record_run(&self, record: &RunHistoryRecord) -> Result<(), StorageError> {
        self.inner.record_run(record)
    }
    fn recent_runs(&self, limit: usize) -> Result<Vec<RunHistoryRecord>, StorageError> {
        self.inner.recent_runs(limit)
    }
}

impl HealthProbe for FaultyStore {
    fn ping(&self) -> Result<(), StorageError> {
        if self.faults.ping {
            return Err(injected("ping"));
        }
        self.inner.ping()
    }
    fn checkpoint(&self) -> Result<(), StorageError> {
        if self.faults.checkpoint {
            return Err(injected("checkpoint"));
        }
        self.inner.checkpoint()
    }
}
