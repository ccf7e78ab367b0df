//! Storage configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Configuration for the SQLite backing store.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file path. Default: `geotrust.db`.
    pub path: Option<String>,
    /// SQLite busy timeout in milliseconds. Default: 5000.
    pub busy_timeout_ms: Option<u64>,
    /// Hard deadline per query in milliseconds. Default: 30000.
    pub query_timeout_ms: Option<u64>,
    /// Read connections for file-backed databases. Default: 4.
    pub read_pool_size: Option<usize>,
}

impl StorageConfig {
    /// Returns the effective database path, defaulting to `geotrust.db`.
    pub fn effective_path(&self) -> PathBuf {
        PathBuf::from(
            self.path
                .as_deref()
                .unwrap_or(constants::DEFAULT_DATABASE_PATH),
        )
    }

    /// Returns the effective busy timeout, defaulting to 5s.
    pub fn effective_busy_timeout(&self) -> Duration {
        Duration::from_millis(
            self.busy_timeout_ms
                .unwrap_or(constants::DEFAULT_BUSY_TIMEOUT_MS),
        )
    }

    /// Returns the effective per-query deadline, defaulting to 30s.
    pub fn effective_query_timeout(&self) -> Duration {
        Duration::from_millis(
            self.query_timeout_ms
                .unwrap_or(constants::DEFAULT_QUERY_TIMEOUT_MS),
        )
    }

    /// Returns the effective read pool size, defaulting to 4.
    pub fn effective_read_pool_size(&self) -> usize {
        self.read_pool_size
            .unwrap_or(constants::DEFAULT_READ_POOL_SIZE)
    }
}
