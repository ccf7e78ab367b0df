//! StorageEngine: the SQLite-backed implementation of every repository
//! trait the pipeline consumes.

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use geotrust_core::config::StorageConfig;
use geotrust_core::errors::StorageError;
use geotrust_core::models::{
    Alert, RunHistoryRecord, RunInput, RunLock, Snapshot, StoreRecord, Ticket,
    TransactionRecord,
};
use geotrust_core::traits::{
    AlertRepository, HealthProbe, RunHistoryRepository, RunLockRepository, SnapshotRepository,
    StoreRepository, TicketRepository, TransactionRepository,
};

use crate::connection::DatabaseManager;
use crate::queries;
use crate::queries::util::sqlite_err;

pub struct StorageEngine {
    db: DatabaseManager,
}

impl StorageEngine {
    /// Open a file-backed engine.
    pub fn open(path: &Path, config: &StorageConfig) -> Result<Self, StorageError> {
        Ok(Self {
            db: DatabaseManager::open(path, config)?,
        })
    }

    /// Open using the path from `config`.
    pub fn open_configured(config: &StorageConfig) -> Result<Self, StorageError> {
        Self::open(&config.effective_path(), config)
    }

    /// Open an in-memory engine (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Ok(Self {
            db: DatabaseManager::open_in_memory()?,
        })
    }

    pub fn open_in_memory_with(config: &StorageConfig) -> Result<Self, StorageError> {
        Ok(Self {
            db: DatabaseManager::open_in_memory_with(config)?,
        })
    }

    /// Insert upstream transactions. Existing ids are ignored. Returns the
    /// number inserted.
    pub fn ingest_transactions(&self, records: &[TransactionRecord]) -> Result<usize, StorageError> {
        self.db.with_writer("ingest_transactions", |conn| {
            queries::transactions::insert_transactions(conn, records)
        })
    }

    pub fn database(&self) -> &DatabaseManager {
        &self.db
    }
}

impl StoreRepository for StorageEngine {
    fn upsert_store(&self, store: &StoreRecord) -> Result<StoreRecord, StorageError> {
        self.db.with_writer("upsert_store", |conn| {
            queries::stores::upsert_store(conn, store)?;
            queries::stores::get_store(conn, store.store_id)?.ok_or_else(|| {
                StorageError::InvalidRow {
                    table: "stores".to_string(),
                    message: format!("store {} missing after upsert", store.store_id),
                }
            })
        })
    }

    fn get_store(&self, store_id: i64) -> Result<Option<StoreRecord>, StorageError> {
        self.db
            .with_reader("get_store", |conn| queries::stores::get_store(conn, store_id))
    }

    fn list_stores(&self) -> Result<Vec<StoreRecord>, StorageError> {
        self.db.with_reader("list_stores", queries::stores::list_stores)
    }
}

impl TransactionRepository for StorageEngine {
    fn list_transactions(&self) -> Result<Vec<TransactionRecord>, StorageError> {
        self.db
            .with_reader("list_transactions", queries::transactions::list_transactions)
    }

    fn load_run_input(&self) -> Result<RunInput, StorageError> {
        self.db.with_reader("load_run_input", |conn| {
            let tx = conn.unchecked_transaction().map_err(sqlite_err)?;
            let stores = queries::stores::list_stores(&tx)?;
            let transactions = queries::transactions::list_transactions(&tx)?;
            tx.commit().map_err(sqlite_err)?;
            Ok(RunInput {
                stores,
                transactions,
            })
        })
    }
}

impl AlertRepository for StorageEngine {
    fn insert_alert_if_absent(&self, alert: &Alert) -> Result<bool, StorageError> {
        self.db.with_writer("insert_alert", |conn| {
            queries::alerts::insert_alert_if_absent(conn, alert)
        })
    }

    fn alerts_for_day(&self, day: NaiveDate) -> Result<Vec<Alert>, StorageError> {
        self.db
            .with_reader("alerts_for_day", |conn| queries::alerts::alerts_for_day(conn, day))
    }
}

impl TicketRepository for StorageEngine {
    fn create_ticket_if_absent(&self, ticket: &Ticket) -> Result<bool, StorageError> {
        self.db.with_writer("create_ticket", |conn| {
            queries::tickets::create_ticket_if_absent(conn, ticket)
        })
    }

    fn get_ticket(&self, store_id: i64, day: NaiveDate) -> Result<Option<Ticket>, StorageError> {
        self.db.with_reader("get_ticket", |conn| {
            queries::tickets::get_ticket(conn, store_id, day)
        })
    }

    fn open_tickets(&self) -> Result<Vec<Ticket>, StorageError> {
        self.db.with_reader("open_tickets", queries::tickets::open_tickets)
    }

    fn resolve_ticket(
        &self,
        store_id: i64,
        day: NaiveDate,
        resolved_at: DateTime<Utc>,
    ) -> Result<bool, StorageError> {
        self.db.with_writer("resolve_ticket", |conn| {
            queries::tickets::resolve_ticket(conn, store_id, day, resolved_at)
        })
    }
}

impl SnapshotRepository for StorageEngine {
    fn append_snapshot(&self, snapshot: &Snapshot) -> Result<i64, StorageError> {
        self.db.with_writer("append_snapshot", |conn| {
            queries::snapshots::append_snapshot(conn, snapshot)
        })
    }

    fn recent_snapshots(&self, limit: usize) -> Result<Vec<Snapshot>, StorageError> {
        self.db.with_reader("recent_snapshots", |conn| {
            queries::snapshots::recent_snapshots(conn, limit)
        })
    }
}

// Lock operations go through the writer so every check sees the latest commit.
impl RunLockRepository for StorageEngine {
    fn current_lock(&self) -> Result<Option<RunLock>, StorageError> {
        self.db.with_writer("current_lock", queries::run_lock::current_lock)
    }

    fn try_acquire_lock(&self, lock: &RunLock) -> Result<bool, StorageError> {
        self.db
            .with_writer("acquire_lock", |conn| queries::run_lock::try_acquire(conn, lock))
    }

    fn clear_lock(&self, expected: &RunLock) -> Result<bool, StorageError> {
        self.db.with_writer("clear_lock", |conn| {
            queries::run_lock::clear_if_matches(conn, expected)
        })
    }

    fn release_lock(&self, holder: &str) -> Result<bool, StorageError> {
        self.db
            .with_writer("release_lock", |conn| queries::run_lock::release(conn, holder))
    }
}

impl RunHistoryRepository for StorageEngine {
    fn record_run(&self, record: &RunHistoryRecord) -> Result<(), StorageError> {
        self.db
            .with_writer("record_run", |conn| queries::run_history::record_run(conn, record))
    }

    fn recent_runs(&self, limit: usize) -> Result<Vec<RunHistoryRecord>, StorageError> {
        self.db.with_reader("recent_runs", |conn| {
            queries::run_history::recent_runs(conn, limit)
        })
    }
}

impl HealthProbe for StorageEngine {
    fn ping(&self) -> Result<(), StorageError> {
        self.db.ping()
    }

    fn checkpoint(&self) -> Result<(), StorageError> {
        if self.db.path().is_none() {
            return Ok(());
        }
        self.db.checkpoint()
    }
}
