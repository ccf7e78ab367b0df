//! Repository seams between the pipeline and persistence.

pub mod repositories;

pub use repositories::{
    AlertRepository, HealthProbe, PipelineStore, RunHistoryRepository, RunLockRepository,
    SnapshotRepository, StoreRepository, TicketRepository, TransactionRepository,
};
