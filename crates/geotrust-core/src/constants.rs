//! Shared constants for the GeoTrust pipeline.

/// Municipality claim that always vetoes verification.
pub const UNKNOWN_MUNICIPALITY: &str = "Unknown";

// ---- Geofence (Metro Manila) ----

pub const DEFAULT_MIN_LATITUDE: f64 = 14.2;
pub const DEFAULT_MAX_LATITUDE: f64 = 14.9;
pub const DEFAULT_MIN_LONGITUDE: f64 = 120.9;
pub const DEFAULT_MAX_LONGITUDE: f64 = 121.2;

// ---- Storage ----

/// Default database file name, resolved against the working directory.
pub const DEFAULT_DATABASE_PATH: &str = "geotrust.db";

/// Default SQLite busy timeout in milliseconds.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Default hard deadline for a single query in milliseconds.
pub const DEFAULT_QUERY_TIMEOUT_MS: u64 = 30_000;

/// Default number of read connections for file-backed databases.
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

// ---- Run lock ----

/// A run marker older than this is considered stale (10 minutes).
pub const DEFAULT_STALE_LOCK_SECS: u64 = 600;

// ---- Tickets ----

/// Number of sample transaction ids carried on a ticket.
pub const DEFAULT_TICKET_SAMPLE_SIZE: usize = 3;

/// Upper bound on sample transaction ids per ticket.
pub const MAX_TICKET_SAMPLE_SIZE: usize = 3;

// ---- Snapshots ----

/// Number of historical snapshots consulted for trend classification.
pub const DEFAULT_TREND_WINDOW: usize = 14;

/// Verification-rate delta (percentage points) separating a trend from noise.
pub const TREND_DELTA_THRESHOLD: f64 = 2.0;

// ---- SLO evaluation ----

/// Absolute tolerance for the `==` operator.
pub const SLO_EQUALITY_EPSILON: f64 = 1e-9;

// ---- Metric names ----

pub const METRIC_VERIFICATION_RATE: &str = "verification_rate";
pub const METRIC_TOTAL_VIOLATIONS: &str = "total_violations";
pub const METRIC_CORE_INTEGRITY_VIOLATIONS: &str = "core_integrity_violations";
pub const METRIC_GEOFENCE_VIOLATIONS: &str = "geofence_violations";
pub const METRIC_COVERAGE_GAP_STORES: &str = "coverage_gap_stores";
pub const METRIC_UNKNOWN_MUNICIPALITY: &str = "unknown_municipality_transactions";
pub const METRIC_DATA_FRESHNESS_HOURS: &str = "data_freshness_hours";
pub const METRIC_REGISTRY_STORE_COUNT: &str = "registry_store_count";
pub const METRIC_TRANSACTION_COUNT: &str = "transaction_count";

/// Every metric the evaluator can compute.
pub const KNOWN_METRICS: [&str; 9] = [
    METRIC_VERIFICATION_RATE,
    METRIC_TOTAL_VIOLATIONS,
    METRIC_CORE_INTEGRITY_VIOLATIONS,
    METRIC_GEOFENCE_VIOLATIONS,
    METRIC_COVERAGE_GAP_STORES,
    METRIC_UNKNOWN_MUNICIPALITY,
    METRIC_DATA_FRESHNESS_HOURS,
    METRIC_REGISTRY_STORE_COUNT,
    METRIC_TRANSACTION_COUNT,
];

// ---- Integrity check categories ----

pub const CATEGORY_CORE_INTEGRITY: &str = "Core Integrity";
pub const CATEGORY_GEOFENCE_BOUNDS: &str = "Geofence Bounds";
pub const CATEGORY_COVERAGE: &str = "Coverage";
pub const CATEGORY_UNKNOWN_MUNICIPALITY: &str = "Unknown Municipality";

/// Category used for alerts raised from SLO breaches.
pub const CATEGORY_SLO: &str = "SLO";
