//! StorageEngine through the repository traits.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use geotrust_core::config::StorageConfig;
use geotrust_core::models::{RunLock, StoreRecord, TransactionRecord};
use geotrust_core::traits::{
    HealthProbe, PipelineStore, RunLockRepository, StoreRepository, TransactionRepository,
};
use geotrust_storage::StorageEngine;

fn store(id: i64) -> StoreRecord {
    let ts = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
    StoreRecord {
        store_id: id,
        store_name: format!("Store {id}"),
        municipality: "Manila".to_string(),
        barangay: "Ermita".to_string(),
        latitude: 14.58,
        longitude: 120.98,
        created_at: ts,
        updated_at: ts,
    }
}

#[test]
fn engine_is_a_pipeline_store() {
    let engine: Arc<dyn PipelineStore> = Arc::new(StorageEngine::open_in_memory().unwrap());
    engine.ping().unwrap();
    let persisted = engine.upsert_store(&store(1)).unwrap();
    assert_eq!(persisted, store(1));
    assert_eq!(engine.list_stores().unwrap().len(), 1);
}

#[test]
fn file_engine_reads_see_writes() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig {
        path: Some(dir.path().join("engine.db").display().to_string()),
        ..Default::default()
    };
    let engine = StorageEngine::open_configured(&config).unwrap();
    engine.upsert_store(&store(5)).unwrap();
    engine
        .ingest_transactions(&[TransactionRecord {
            transaction_id: "t-1".to_string(),
            store_id: Some(5),
            claimed_municipality: "Manila".to_string(),
            claimed_verified_flag: true,
            basket_item_count: 1,
            timestamp: Utc.with_ymd_and_hms(2025, 3, 1, 6, 0, 0).unwrap(),
        }])
        .unwrap();

    assert!(engine.get_store(5).unwrap().is_some());
    let txs = engine.list_transactions().unwrap();
    assert_eq!(txs.len(), 1);
    assert!(txs[0].claimed_verified_flag);
}

#[test]
fn engine_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reopen.db");
    {
        let engine = StorageEngine::open(&path, &StorageConfig::default()).unwrap();
        engine.upsert_store(&store(9)).unwrap();
        let lock = RunLock {
            holder: "run-x".to_string(),
            acquired_at: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
        };
        assert!(engine.try_acquire_lock(&lock).unwrap());
    }
    let engine = StorageEngine::open(&path, &StorageConfig::default()).unwrap();
    assert_eq!(engine.get_store(9).unwrap().unwrap().store_name, "Store 9");
    assert_eq!(engine.current_lock().unwrap().unwrap().holder, "run-x");
}

#[test]
fn run_input_reads_both_tables_together() {
    let dir = tempfile::tempdir().unwrap();
    let engine = StorageEngine::open(&dir.path().join("input.db"), &StorageConfig::default()).unwrap();
    engine.upsert_store(&store(2)).unwrap();
    engine.upsert_store(&store(1)).unwrap();
    engine
        .ingest_transactions(&[TransactionRecord {
            transaction_id: "t-9".to_string(),
            store_id: Some(7),
            claimed_municipality: "Unknown".to_string(),
            claimed_verified_flag: false,
            basket_item_count: 4,
            timestamp: Utc.with_ymd_and_hms(2025, 3, 1, 6, 0, 0).unwrap(),
        }])
        .unwrap();

    let input = engine.load_run_input().unwrap();
    let ids: Vec<i64> = input.stores.iter().map(|s| s.store_id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(input.transactions, engine.list_transactions().unwrap());

    // The read transaction is closed; later writes are visible.
    engine.upsert_store(&store(3)).unwrap();
    assert_eq!(engine.load_run_input().unwrap().stores.len(), 3);
}

#[test]
fn checkpoint_is_safe_for_both_backends() {
    let memory = StorageEngine::open_in_memory().unwrap();
    memory.checkpoint().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let file = StorageEngine::open(&dir.path().join("ckpt.db"), &StorageConfig::default()).unwrap();
    file.upsert_store(&store(1)).unwrap();
    file.checkpoint().unwrap();
    assert_eq!(file.list_stores().unwrap().len(), 1);
}
