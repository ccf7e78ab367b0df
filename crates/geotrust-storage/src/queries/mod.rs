//! Query modules: one per table. Free functions taking a `&Connection`.

pub mod alerts;
pub mod run_history;
pub mod run_lock;
pub mod snapshots;
pub mod stores;
pub mod tickets;
pub mod transactions;
pub mod util;
