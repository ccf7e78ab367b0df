//! GeotrustErrorCode trait for structured error reporting.

/// Every error enum implements this to provide a stable, machine-readable
/// code for run reports and notifications.
pub trait GeotrustErrorCode {
    /// Returns the error code string (e.g., "STORAGE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted report string: `[ERROR_CODE] message`.
    fn report_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const DB_BUSY: &str = "DB_BUSY";
pub const QUERY_TIMEOUT: &str = "QUERY_TIMEOUT";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const INVALID_ROW: &str = "INVALID_ROW";
pub const GEOFENCE_VIOLATION: &str = "GEOFENCE_VIOLATION";
pub const INVALID_FIELD: &str = "INVALID_FIELD";
pub const CONNECTIVITY_ERROR: &str = "CONNECTIVITY_ERROR";
pub const RUN_IN_PROGRESS: &str = "RUN_IN_PROGRESS";
pub const STALE_RUN_LOCK: &str = "STALE_RUN_LOCK";
