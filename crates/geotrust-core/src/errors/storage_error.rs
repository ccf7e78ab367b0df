//! Storage-layer errors for SQLite operations.

use super::error_code::{self, GeotrustErrorCode};

/// Errors raised by the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Database busy: {message}")]
    Busy { message: String },

    #[error("Query interrupted")]
    Interrupted,

    #[error("{operation} exceeded its {timeout_ms}ms deadline")]
    Timeout { operation: String, timeout_ms: u64 },

    #[error("Migration to v{version} failed: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("Invalid row in {table}: {message}")]
    InvalidRow { table: String, message: String },
}

impl StorageError {
    /// True for errors produced by a deadline or an interrupted statement.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Interrupted)
    }
}

impl GeotrustErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SqliteError { .. } => error_code::STORAGE_ERROR,
            Self::Busy { .. } => error_code::DB_BUSY,
            Self::Interrupted | Self::Timeout { .. } => error_code::QUERY_TIMEOUT,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::InvalidRow { .. } => error_code::INVALID_ROW,
        }
    }
}
