//! # geotrust-pipeline
//!
//! The zero-trust verification pipeline. Transactions are classified against
//! the store registry, integrity checks and SLOs are evaluated, and regressions
//! turn into deduplicated alerts and remediation tickets. The
//! [`orchestrator`] drives one run through its state machine.

// Counting and percentage math converts u64 counts to f64 throughout.
#![allow(clippy::cast_precision_loss)]

pub mod alerts;
pub mod classifier;
pub mod integrity;
pub mod issue;
pub mod notify;
pub mod orchestrator;
pub mod registry;
pub mod slo;
pub mod snapshot;
pub mod tickets;

pub use orchestrator::{Orchestrator, RunReport};
