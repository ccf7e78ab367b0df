//! One typed repository per entity. Implementations must use parameterised
//! statements; the pipeline never builds query strings.

use chrono::{DateTime, NaiveDate, Utc};

use crate::errors::StorageError;
use crate::models::{
    Alert, RunHistoryRecord, RunInput, RunLock, Snapshot, StoreRecord, Ticket,
    TransactionRecord,
};

/// Registry persistence.
pub trait StoreRepository: Send + Sync {
    /// Insert or update by `store_id`. `created_at` of an existing row is kept.
    /// Returns the row as persisted.
    fn upsert_store(&self, store: &StoreRecord) -> Result<StoreRecord, StorageError>;
    fn get_store(&self, store_id: i64) -> Result<Option<StoreRecord>, StorageError>;
    /// All stores ordered by `store_id`.
    fn list_stores(&self) -> Result<Vec<StoreRecord>, StorageError>;
}

/// Read access to upstream-owned transactions.
pub trait TransactionRepository: Send + Sync {
    /// All transactions ordered by `transaction_id`.
    fn list_transactions(&self) -> Result<Vec<TransactionRecord>, StorageError>;
    /// Registry and transactions read inside one read transaction, so both
    /// lists come from the same committed state.
    fn load_run_input(&self) -> Result<RunInput, StorageError>;
}

pub trait AlertRepository: Send + Sync {
    /// Atomic create-if-absent keyed on `dedup_key`. Returns true if inserted.
    fn insert_alert_if_absent(&self, alert: &Alert) -> Result<bool, StorageError>;
    fn alerts_for_day(&self, day: NaiveDate) -> Result<Vec<Alert>, StorageError>;
}

pub trait TicketRepository: Send + Sync {
    /// Atomic create-if-absent keyed on `(store_id, day)`. Returns true if inserted.
    fn create_ticket_if_absent(&self, ticket: &Ticket) -> Result<bool, StorageError>;
    fn get_ticket(&self, store_id: i64, day: NaiveDate) -> Result<Option<Ticket>, StorageError>;
    fn open_tickets(&self) -> Result<Vec<Ticket>, StorageError>;
    /// Marks an open ticket resolved. Returns false if it was not open.
    fn resolve_ticket(
        &self,
        store_id: i64,
        day: NaiveDate,
        resolved_at: DateTime<Utc>,
    ) -> Result<bool, StorageError>;
}

/// Append-only snapshot history.
pub trait SnapshotRepository: Send + Sync {
    fn append_snapshot(&self, snapshot: &Snapshot) -> Result<i64, StorageError>;
    /// Most recent first.
    fn recent_snapshots(&self, limit: usize) -> Result<Vec<Snapshot>, StorageError>;
}

/// Single-row in-progress marker.
pub trait RunLockRepository: Send + Sync {
    fn current_lock(&self) -> Result<Option<RunLock>, StorageError>;
    /// Takes the marker only if none is held. Returns true if acquired.
    fn try_acquire_lock(&self, lock: &RunLock) -> Result<bool, StorageError>;
    /// Clears the marker only if it still equals `expected`.
    fn clear_lock(&self, expected: &RunLock) -> Result<bool, StorageError>;
    /// Releases the marker if `holder` owns it.
    fn release_lock(&self, holder: &str) -> Result<bool, StorageError>;
}

pub trait RunHistoryRepository: Send + Sync {
    fn record_run(&self, record: &RunHistoryRecord) -> Result<(), StorageError>;
    /// Most recent first.
    fn recent_runs(&self, limit: usize) -> Result<Vec<RunHistoryRecord>, StorageError>;
}

/// Connectivity probe used by the CONNECT stage, and end-of-run maintenance.
pub trait HealthProbe: Send + Sync {
    fn ping(&self) -> Result<(), StorageError>;
    /// Flush the write-ahead log into the main database file. A no-op for
    /// stores without one.
    fn checkpoint(&self) -> Result<(), StorageError>;
}

/// Everything a pipeline run needs from its backing store.
pub trait PipelineStore:
    StoreRepository
    + TransactionRepository
    + AlertRepository
    + TicketRepository
    + SnapshotRepository
    + RunLockRepository
    + RunHistoryRepository
    + HealthProbe
{
}

impl<T> PipelineStore for T where
    T: StoreRepository
        + TransactionRepository
        + AlertRepository
        + TicketRepository
        + SnapshotRepository
        + RunLockRepository
        + RunHistoryRepository
        + HealthProbe
{
}
