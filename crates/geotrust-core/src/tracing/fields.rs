//! Structured span/event field names used across the pipeline. Consistent
//! names keep log queries and dashboards stable.

/// Pipeline state being executed.
pub const STAGE: &str = "stage";

/// Run identifier (uuid v4).
pub const RUN_ID: &str = "run_id";

/// Stage duration in milliseconds.
pub const STAGE_DURATION_MS: &str = "stage_duration_ms";

/// Verification rate (0-100) of the current run.
pub const VERIFICATION_RATE: &str = "verification_rate";

/// Total integrity violations of the current run.
pub const TOTAL_VIOLATIONS: &str = "total_violations";

/// Integrity check evaluation time in milliseconds.
pub const CHECK_DURATION_MS: &str = "check_duration_ms";

/// Query wall-clock time in milliseconds.
pub const QUERY_DURATION_MS: &str = "query_duration_ms";
