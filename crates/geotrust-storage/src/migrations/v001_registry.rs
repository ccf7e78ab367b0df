//! V001: store registry and the upstream transaction table.

pub const MIGRATION_SQL: &str = r#"
-- Authoritative registry of physical stores. Membership here is what makes
-- a transaction verifiable.
CREATE TABLE IF NOT EXISTS stores (
    store_id INTEGER PRIMARY KEY,
    store_name TEXT NOT NULL,
    municipality TEXT NOT NULL,
    barangay TEXT NOT NULL,
    latitude REAL NOT NULL,
    longitude REAL NOT NULL,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_stores_municipality
    ON stores(municipality);

-- Written by the ingestion collaborator; the pipeline only reads it.
-- store_id is nullable and deliberately has no foreign key: unregistered
-- ids are exactly what the integrity checks look for.
CREATE TABLE IF NOT EXISTS transactions (
    transaction_id TEXT PRIMARY KEY,
    store_id INTEGER,
    claimed_municipality TEXT NOT NULL,
    claimed_verified_flag INTEGER NOT NULL DEFAULT 0,
    basket_item_count INTEGER NOT NULL DEFAULT 0,
    timestamp INTEGER NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_transactions_store
    ON transactions(store_id);
CREATE INDEX IF NOT EXISTS idx_transactions_timestamp
    ON transactions(timestamp);

CREATE TRIGGER IF NOT EXISTS transactions_no_update
    BEFORE UPDATE ON transactions
BEGIN
    SELECT RAISE(ABORT, 'transactions are immutable');
END;
"#;
