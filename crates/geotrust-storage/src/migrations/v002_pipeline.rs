//! V002: pipeline outputs.
//! alerts, tickets, snapshots, run_lock, run_history.

pub const MIGRATION_SQL: &str = r#"
-- Alerts: one row per dedup_key (hash of check identity + day).
CREATE TABLE IF NOT EXISTS alerts (
    id TEXT PRIMARY KEY,
    dedup_key TEXT NOT NULL UNIQUE,
    category TEXT NOT NULL,
    name TEXT NOT NULL,
    message TEXT NOT NULL,
    severity TEXT NOT NULL,
    day TEXT NOT NULL,
    created_at INTEGER NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_alerts_day ON alerts(day);

-- Tickets: at most one per (store_id, day).
CREATE TABLE IF NOT EXISTS tickets (
    store_id INTEGER NOT NULL,
    day TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    reason TEXT NOT NULL,
    transaction_count INTEGER NOT NULL,
    sample_transaction_ids TEXT NOT NULL,
    municipality TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'open' CHECK (status IN ('open', 'resolved')),
    resolved_at INTEGER,
    document TEXT NOT NULL,
    PRIMARY KEY (store_id, day)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_tickets_open
    ON tickets(store_id) WHERE status = 'open';

-- Snapshots: append-only health history.
CREATE TABLE IF NOT EXISTS snapshots (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    run_id TEXT NOT NULL,
    timestamp INTEGER NOT NULL,
    system_health TEXT NOT NULL,
    verification_rate REAL NOT NULL,
    total_violations INTEGER NOT NULL,
    transaction_count INTEGER NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_snapshots_timestamp ON snapshots(timestamp);

CREATE TRIGGER IF NOT EXISTS snapshots_no_update
    BEFORE UPDATE ON snapshots
BEGIN
    SELECT RAISE(ABORT, 'snapshots are append-only');
END;

CREATE TRIGGER IF NOT EXISTS snapshots_no_delete
    BEFORE DELETE ON snapshots
BEGIN
    SELECT RAISE(ABORT, 'snapshots are append-only');
END;

-- In-progress marker. At most one row.
CREATE TABLE IF NOT EXISTS run_lock (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    holder TEXT NOT NULL,
    acquired_at INTEGER NOT NULL
) STRICT;

CREATE TABLE IF NOT EXISTS run_history (
    run_id TEXT PRIMARY KEY,
    started_at INTEGER NOT NULL,
    finished_at INTEGER NOT NULL,
    status TEXT NOT NULL,
    final_state TEXT NOT NULL,
    worst_stage TEXT,
    reason TEXT
) STRICT;

CREATE INDEX IF NOT EXISTS idx_run_history_started ON run_history(started_at);
"#;
