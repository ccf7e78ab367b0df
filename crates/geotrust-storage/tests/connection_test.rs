//! Connection manager, migrations, and query deadlines.

use geotrust_core::config::StorageConfig;
use geotrust_core::errors::StorageError;
use geotrust_storage::connection::pragmas::verify_wal_mode;
use geotrust_storage::migrations::{current_version, run_migrations, LATEST_VERSION};
use geotrust_storage::queries::util::sqlite_err;
use geotrust_storage::DatabaseManager;
use rusqlite::Connection;

#[test]
fn migrations_reach_latest_version() {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    assert_eq!(current_version(&conn).unwrap(), LATEST_VERSION);
}

#[test]
fn migrations_are_idempotent() {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    run_migrations(&conn).unwrap();
    assert_eq!(current_version(&conn).unwrap(), LATEST_VERSION);

    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'
             AND name IN ('stores', 'transactions', 'alerts', 'tickets', 'snapshots',
                          'run_lock', 'run_history')",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(tables, 7);
}

#[test]
fn file_database_uses_wal_and_read_pool() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("geotrust.db");
    let config = StorageConfig {
        read_pool_size: Some(2),
        ..Default::default()
    };
    let db = DatabaseManager::open(&path, &config).unwrap();
    assert_eq!(db.path(), Some(path.as_path()));

    let wal = db
        .with_writer("wal", |conn| verify_wal_mode(conn))
        .unwrap();
    assert!(wal);

    db.with_writer("insert", |conn| {
        conn.execute(
            "INSERT INTO run_lock (id, holder, acquired_at) VALUES (1, 'a', 0)",
            [],
        )
        .map(|_| ())
        .map_err(sqlite_err)
    })
    .unwrap();

    // Readers see the writer's committed rows.
    for _ in 0..4 {
        let count: i64 = db
            .with_reader("count", |conn| {
                conn.query_row("SELECT COUNT(*) FROM run_lock", [], |row| row.get(0))
                    .map_err(sqlite_err)
            })
            .unwrap();
        assert_eq!(count, 1);
    }
}

#[test]
fn checkpoint_truncates_the_wal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ckpt.db");
    let db = DatabaseManager::open(&path, &StorageConfig::default()).unwrap();
    db.with_writer("insert", |conn| {
        conn.execute(
            "INSERT INTO run_lock (id, holder, acquired_at) VALUES (1, 'a', 0)",
            [],
        )
        .map(|_| ())
        .map_err(sqlite_err)
    })
    .unwrap();

    db.checkpoint().unwrap();

    let wal = dir.path().join("ckpt.db-wal");
    let wal_len = std::fs::metadata(&wal).map(|m| m.len()).unwrap_or(0);
    assert_eq!(wal_len, 0);
}

#[test]
fn read_connections_reject_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ro.db");
    let db = DatabaseManager::open(&path, &StorageConfig::default()).unwrap();

    let result = db.with_reader("write_attempt", |conn| {
        conn.execute("DELETE FROM stores", []).map_err(sqlite_err)
    });
    assert!(result.is_err());
}

#[test]
fn open_fails_for_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("geotrust.db");
    let result = DatabaseManager::open(&path, &StorageConfig::default());
    assert!(matches!(result, Err(StorageError::SqliteError { .. })));
}

#[test]
fn runaway_query_hits_deadline() {
    let config = StorageConfig {
        query_timeout_ms: Some(50),
        ..Default::default()
    };
    let db = DatabaseManager::open_in_memory_with(&config).unwrap();

    let result = db.with_reader("runaway", |conn| {
        conn.query_row(
            "WITH RECURSIVE c(x) AS (SELECT 1 UNION ALL SELECT x + 1 FROM c)
             SELECT COUNT(*) FROM c",
            [],
            |row| row.get::<_, i64>(0),
        )
        .map_err(sqlite_err)
    });

    match result {
        Err(StorageError::Timeout { operation, timeout_ms }) => {
            assert_eq!(operation, "runaway");
            assert_eq!(timeout_ms, 50);
        }
        other => panic!("expected timeout, got {other:?}"),
    }

    // The handler is cleared afterwards; normal queries still work.
    db.ping().unwrap();
}
