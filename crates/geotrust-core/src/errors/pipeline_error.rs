//! Pipeline errors. Only the variants here can abort a run; everything else
//! is recorded as a stage issue and downgrades the final status.

use super::error_code::{self, GeotrustErrorCode};
use super::{ConfigError, RegistryError, StorageError};

/// Errors that can occur during pipeline execution.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Connectivity error: {message}")]
    Connectivity { message: String },

    #[error("Another run is in progress (holder {holder}, started {age_secs}s ago)")]
    RunInProgress { holder: String, age_secs: i64 },

    #[error("Stale run marker from {holder} ({age_secs}s old) and policy is to refuse")]
    StaleRunLock { holder: String, age_secs: i64 },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}

impl GeotrustErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Connectivity { .. } => error_code::CONNECTIVITY_ERROR,
            Self::RunInProgress { .. } => error_code::RUN_IN_PROGRESS,
            Self::StaleRunLock { .. } => error_code::STALE_RUN_LOCK,
            Self::Storage(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Registry(e) => e.error_code(),
        }
    }
}
