//! Orchestrator: drives one run through the pipeline state machine.

pub mod connector;
pub mod report;
pub mod runner;
pub mod state;

pub use connector::{Connector, SharedConnector, SqliteConnector};
pub use report::{RunReport, StageRecord};
pub use runner::Orchestrator;
pub use state::{transition, PipelineState, StageOutcome};
