//! Store Registry: the authoritative list of physical stores.
//!
//! Writes are pure CRUD: validate, bounds-check against the geofence, upsert.
//! Nothing else is rechecked or triggered by a write.

use chrono::Utc;
use geotrust_core::errors::{GeotrustErrorCode, RegistryError};
use geotrust_core::models::{Geofence, StoreRecord};
use geotrust_core::traits::StoreRepository;
use serde::{Deserialize, Serialize};

/// The fields of an `add_or_update_store` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreUpsert {
    pub store_id: i64,
    pub store_name: String,
    pub municipality: String,
    pub barangay: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// External shape of a registry write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryWriteOutcome {
    pub success: bool,
    pub message: String,
}

impl RegistryWriteOutcome {
    pub fn from_result(result: &Result<StoreRecord, RegistryError>) -> Self {
        match result {
            Ok(store) => Self {
                success: true,
                message: format!("store {} ({}) saved", store.store_id, store.store_name),
            },
            Err(e) => Self {
                success: false,
                message: e.report_string(),
            },
        }
    }
}

pub struct StoreRegistry<'a, R: StoreRepository + ?Sized> {
    repo: &'a R,
    geofence: Geofence,
}

impl<'a, R: StoreRepository + ?Sized> StoreRegistry<'a, R> {
    pub fn new(repo: &'a R, geofence: Geofence) -> Self {
        Self { repo, geofence }
    }

    pub fn geofence(&self) -> &Geofence {
        &self.geofence
    }

    /// Insert or update a store. Rejects empty text fields, non-finite
    /// coordinates, and coordinates outside the geofence.
    pub fn add_or_update_store(&self, request: &StoreUpsert) -> Result<StoreRecord, RegistryError> {
        validate_text("store_name", &request.store_name)?;
        validate_text("municipality", &request.municipality)?;
        validate_text("barangay", &request.barangay)?;
        validate_coordinate("latitude", request.latitude)?;
        validate_coordinate("longitude", request.longitude)?;

        if !self.geofence.contains(request.latitude, request.longitude) {
            tracing::warn!(
                store_id = request.store_id,
                latitude = request.latitude,
                longitude = request.longitude,
                "rejected store outside geofence"
            );
            return Err(RegistryError::GeofenceViolation {
                store_id: request.store_id,
                latitude: request.latitude,
                longitude: request.longitude,
                bounds: self.geofence.to_string(),
            });
        }

        let now = Utc::now();
        let record = StoreRecord {
            store_id: request.store_id,
            store_name: request.store_name.trim().to_string(),
            municipality: request.municipality.trim().to_string(),
            barangay: request.barangay.trim().to_string(),
            latitude: request.latitude,
            longitude: request.longitude,
            created_at: now,
            updated_at: now,
        };
        let saved = self.repo.upsert_store(&record)?;
        tracing::info!(store_id = saved.store_id, "store saved to registry");
        Ok(saved)
    }

    /// Convenience wrapper returning the external `{success, message}` shape.
    pub fn submit(&self, request: &StoreUpsert) -> RegistryWriteOutcome {
        RegistryWriteOutcome::from_result(&self.add_or_update_store(request))
    }

    pub fn list_stores(&self) -> Result<Vec<StoreRecord>, RegistryError> {
        Ok(self.repo.list_stores()?)
    }

    /// True if the store is in the registry.
    pub fn exists_verified(&self, store_id: i64) -> Result<bool, RegistryError> {
        Ok(self.repo.get_store(store_id)?.is_some())
    }
}

fn validate_text(field: &str, value: &str) -> Result<(), RegistryError> {
    if value.trim().is_empty() {
        return Err(RegistryError::InvalidField {
            field: field.to_string(),
            message: "must not be empty".to_string(),
        });
    }
    Ok(())
}

fn validate_coordinate(field: &str, value: f64) -> Result<(), RegistryError> {
    if !value.is_finite() {
        return Err(RegistryError::InvalidField {
            field: field.to_string(),
            message: format!("must be a finite number, got {value}"),
        });
    }
    Ok(())
}
