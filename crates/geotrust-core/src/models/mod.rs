//! Data model shared by storage and pipeline crates.

pub mod alert;
pub mod geofence;
pub mod integrity;
pub mod judgment;
pub mod run;
pub mod severity;
pub mod slo;
pub mod snapshot;
pub mod store;
pub mod ticket;
pub mod transaction;

pub use alert::Alert;
pub use geofence::Geofence;
pub use integrity::{CheckStatus, IntegrityCheckResult};
pub use judgment::{VerificationJudgment, VerificationSummary};
pub use run::{RunHistoryRecord, RunInput, RunLock, RunStatus};
pub use severity::Severity;
pub use slo::{SloDefinition, SloEvaluation, SloOperator};
pub use snapshot::{HealthStatus, Snapshot};
pub use store::StoreRecord;
pub use ticket::{Ticket, TicketReason, TicketStatus};
pub use transaction::TransactionRecord;
