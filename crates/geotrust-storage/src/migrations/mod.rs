//! Schema migrations using PRAGMA user_version.

pub mod v001_registry;
pub mod v002_pipeline;

use geotrust_core::errors::StorageError;
use rusqlite::Connection;

/// Latest schema version known to this build.
pub const LATEST_VERSION: u32 = 2;

/// Run all pending migrations. Each migration runs in its own transaction
/// together with its `user_version` bump.
pub fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
    let current_version = current_version(conn)?;

    let migrations: &[(&str, u32)] = &[
        (v001_registry::MIGRATION_SQL, 1),
        (v002_pipeline::MIGRATION_SQL, 2),
    ];

    for (sql, version) in migrations {
        if current_version < *version {
            let batch = format!("BEGIN;\n{sql}\nPRAGMA user_version = {version};\nCOMMIT;");
            if let Err(e) = conn.execute_batch(&batch) {
                let _ = conn.execute_batch("ROLLBACK;");
                return Err(StorageError::MigrationFailed {
                    version: *version,
                    message: e.to_string(),
                });
            }
            tracing::info!(version = version, "applied migration");
        }
    }

    Ok(())
}

/// Get the current schema version.
pub fn current_version(conn: &Connection) -> Result<u32, StorageError> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| StorageError::MigrationFailed {
            version: 0,
            message: e.to_string(),
        })
}
