//! Store registry write-path errors.

use super::error_code::{self, GeotrustErrorCode};
use super::StorageError;

/// Errors returned by `add_or_update_store`.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error(
        "store {store_id} coordinates ({latitude}, {longitude}) are outside the geofence {bounds}"
    )]
    GeofenceViolation {
        store_id: i64,
        latitude: f64,
        longitude: f64,
        bounds: String,
    },

    #[error("Invalid value for {field}: {message}")]
    InvalidField { field: String, message: String },

    #[error("Registry storage error: {0}")]
    Storage(#[from] StorageError),
}

impl GeotrustErrorCode for RegistryError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::GeofenceViolation { .. } => error_code::GEOFENCE_VIOLATION,
            Self::InvalidField { .. } => error_code::INVALID_FIELD,
            Self::Storage(e) => e.error_code(),
        }
    }
}
