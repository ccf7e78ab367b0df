//! Store registry writes, including the geofence boundary cases.

use geotrust_core::errors::RegistryError;
use geotrust_core::models::Geofence;
use geotrust_pipeline::registry::{RegistryWriteOutcome, StoreRegistry, StoreUpsert};
use geotrust_storage::StorageEngine;

fn request(store_id: i64, name: &str, latitude: f64, longitude: f64) -> StoreUpsert {
    StoreUpsert {
        store_id,
        store_name: name.to_string(),
        municipality: "Y".to_string(),
        barangay: "Z".to_string(),
        latitude,
        longitude,
    }
}

#[test]
fn add_store_within_bounds() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let registry = StoreRegistry::new(&engine, Geofence::default());

    let saved = registry
        .add_or_update_store(&StoreUpsert {
            store_id: 115,
            store_name: "New Store".to_string(),
            municipality: "Marikina".to_string(),
            barangay: "Barangay 1".to_string(),
            latitude: 14.63283,
            longitude: 121.102183,
        })
        .unwrap();
    assert_eq!(saved.store_id, 115);
    assert_eq!(saved.municipality, "Marikina");
    assert!(registry.exists_verified(115).unwrap());
    assert!(!registry.exists_verified(116).unwrap());
}

#[test]
fn geofence_bounds_are_inclusive() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let registry = StoreRegistry::new(&engine, Geofence::default());

    assert!(registry.add_or_update_store(&request(116, "X", 14.2, 120.9)).is_ok());
    assert!(registry.add_or_update_store(&request(118, "X", 14.9, 121.2)).is_ok());

    let err = registry
        .add_or_update_store(&request(117, "X", 14.199999, 120.9))
        .unwrap_err();
    assert!(matches!(err, RegistryError::GeofenceViolation { store_id: 117, .. }));
    assert!(!registry.exists_verified(117).unwrap());
}

#[test]
fn rejected_write_leaves_existing_store_untouched() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let registry = StoreRegistry::new(&engine, Geofence::default());
    registry.add_or_update_store(&request(1, "Original", 14.5, 121.0)).unwrap();

    assert!(registry.add_or_update_store(&request(1, "Moved", 10.0, 121.0)).is_err());
    let stores = registry.list_stores().unwrap();
    assert_eq!(stores.len(), 1);
    assert_eq!(stores[0].store_name, "Original");
}

#[test]
fn update_keeps_single_row() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let registry = StoreRegistry::new(&engine, Geofence::default());
    registry.add_or_update_store(&request(1, "Before", 14.5, 121.0)).unwrap();
    let first = registry.list_stores().unwrap()[0].created_at;

    let updated = registry.add_or_update_store(&request(1, "After", 14.6, 121.1)).unwrap();
    assert_eq!(updated.store_name, "After");
    assert_eq!(updated.created_at, first);
    assert_eq!(registry.list_stores().unwrap().len(), 1);
}

#[test]
fn invalid_fields_rejected() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let registry = StoreRegistry::new(&engine, Geofence::default());

    let err = registry.add_or_update_store(&request(1, "  ", 14.5, 121.0)).unwrap_err();
    assert!(matches!(err, RegistryError::InvalidField { ref field, .. } if field == "store_name"));

    let err = registry
        .add_or_update_store(&request(1, "X", f64::NAN, 121.0))
        .unwrap_err();
    assert!(matches!(err, RegistryError::InvalidField { ref field, .. } if field == "latitude"));
}

#[test]
fn custom_geofence_applies() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let registry = StoreRegistry::new(&engine, Geofence::new(10.0, 11.0, 120.0, 121.0));
    assert!(registry.add_or_update_store(&request(1, "X", 10.5, 120.5)).is_ok());
    assert!(registry.add_or_update_store(&request(2, "X", 14.6, 121.0)).is_err());
}

#[test]
fn write_outcome_shape() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let registry = StoreRegistry::new(&engine, Geofence::default());

    let ok = registry.submit(&request(1, "Good", 14.5, 121.0));
    assert!(ok.success);
    assert!(ok.message.contains("store 1"));

    let rejected: RegistryWriteOutcome = registry.submit(&request(2, "Bad", 0.0, 0.0));
    assert!(!rejected.success);
    assert!(rejected.message.contains("GEOFENCE_VIOLATION"), "{}", rejected.message);
}
