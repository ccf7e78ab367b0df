//! Tests for the GeoTrust configuration system.

use std::sync::Mutex;

use geotrust_core::config::{GeotrustConfig, StaleLockPolicy};
use geotrust_core::errors::ConfigError;
use geotrust_core::models::{Severity, SloOperator};

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn clear_geotrust_env_vars() {
    for key in [
        "GEOTRUST_DB_PATH",
        "GEOTRUST_QUERY_TIMEOUT_MS",
        "GEOTRUST_BUSY_TIMEOUT_MS",
        "GEOTRUST_STALE_LOCK_SECS",
        "GEOTRUST_ON_STALE",
        "GEOTRUST_TICKET_SAMPLE_SIZE",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn defaults_cover_metro_manila_and_ship_slos() {
    let config = GeotrustConfig::default();
    let fence = config.geofence.effective_geofence();
    assert_eq!(fence.min_latitude, 14.2);
    assert_eq!(fence.max_latitude, 14.9);
    assert_eq!(fence.min_longitude, 120.9);
    assert_eq!(fence.max_longitude, 121.2);

    let slos = config.slo.effective_targets();
    assert_eq!(slos[0].name, "verification_rate");
    assert_eq!(slos[0].operator, SloOperator::GreaterEqual);
    assert_eq!(slos[0].target, 95.0);
    assert_eq!(slos[0].severity, Severity::Critical);

    assert_eq!(config.run_lock.effective_stale_after_secs(), 600);
    assert_eq!(config.run_lock.effective_on_stale(), StaleLockPolicy::ForceClear);
    assert_eq!(config.tickets.effective_sample_size(), 3);
    assert!(GeotrustConfig::validate(&config).is_ok());
}

#[test]
fn parses_toml_sections() {
    let config = GeotrustConfig::from_toml(
        r#"
[storage]
path = "/var/lib/geotrust/verify.db"
query_timeout_ms = 2500

[geofence]
min_latitude = 10.0
max_latitude = 11.0

[run_lock]
stale_after_secs = 60
on_stale = "refuse"

[[slo.targets]]
name = "verification_rate"
target = 90.0
operator = ">="
severity = "high"

[[slo.targets]]
name = "no_unknown_claims"
metric = "unknown_municipality_transactions"
target = 0.0
operator = "=="
severity = "medium"
"#,
    )
    .unwrap();

    assert_eq!(
        config.storage.effective_path().to_str(),
        Some("/var/lib/geotrust/verify.db")
    );
    assert_eq!(config.storage.effective_query_timeout().as_millis(), 2500);
    let fence = config.geofence.effective_geofence();
    assert_eq!(fence.min_latitude, 10.0);
    assert_eq!(fence.max_longitude, 121.2, "unset bounds keep defaults");
    assert_eq!(config.run_lock.effective_on_stale(), StaleLockPolicy::Refuse);

    let slos = config.slo.effective_targets();
    assert_eq!(slos.len(), 2);
    assert_eq!(slos[1].metric_name(), "unknown_municipality_transactions");
    assert_eq!(slos[1].operator, SloOperator::Equal);
    assert!(GeotrustConfig::validate(&config).is_ok());
}

#[test]
fn rejects_inverted_geofence() {
    let config = GeotrustConfig::from_toml(
        r#"
[geofence]
min_latitude = 15.0
max_latitude = 14.0
"#,
    )
    .unwrap();
    let err = GeotrustConfig::validate(&config).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == "geofence.min_latitude"));
}

#[test]
fn rejects_unknown_metric_and_duplicate_slo() {
    let unknown = GeotrustConfig::from_toml(
        r#"
[[slo.targets]]
name = "latency_p99"
target = 1.0
operator = "<="
severity = "low"
"#,
    )
    .unwrap();
    assert!(GeotrustConfig::validate(&unknown).is_err());

    let duplicate = GeotrustConfig::from_toml(
        r#"
[[slo.targets]]
name = "verification_rate"
target = 95.0
operator = ">="
severity = "critical"

[[slo.targets]]
name = "verification_rate"
target = 90.0
operator = ">="
severity = "high"
"#,
    )
    .unwrap();
    assert!(GeotrustConfig::validate(&duplicate).is_err());
}

#[test]
fn rejects_bad_operator_at_parse_time() {
    let result = GeotrustConfig::from_toml(
        r#"
[[slo.targets]]
name = "verification_rate"
target = 95.0
operator = ">"
severity = "critical"
"#,
    );
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn rejects_zero_timeouts_and_sample_size() {
    for toml in [
        "[storage]\nquery_timeout_ms = 0\n",
        "[storage]\nbusy_timeout_ms = 0\n",
        "[run_lock]\nstale_after_secs = 0\n",
        "[tickets]\nsample_size = 0\n",
    ] {
        let config = GeotrustConfig::from_toml(toml).unwrap();
        assert!(GeotrustConfig::validate(&config).is_err(), "{toml}");
    }
}

#[test]
fn sample_size_is_capped_at_three() {
    for size in [4, 10] {
        let config = GeotrustConfig::from_toml(&format!("[tickets]\nsample_size = {size}\n")).unwrap();
        match GeotrustConfig::validate(&config) {
            Err(ConfigError::ValidationFailed { field, .. }) => {
                assert_eq!(field, "tickets.sample_size");
            }
            other => panic!("expected validation failure for {size}, got {other:?}"),
        }
    }
    for size in 1..=3 {
        let config = GeotrustConfig::from_toml(&format!("[tickets]\nsample_size = {size}\n")).unwrap();
        assert!(GeotrustConfig::validate(&config).is_ok(), "{size}");
    }
}

#[test]
fn load_explicit_file_with_env_override() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_geotrust_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("geotrust.toml");
    std::fs::write(
        &path,
        r#"
[storage]
path = "from-file.db"
query_timeout_ms = 1000
"#,
    )
    .unwrap();

    std::env::set_var("GEOTRUST_QUERY_TIMEOUT_MS", "4000");
    std::env::set_var("GEOTRUST_ON_STALE", "refuse");

    let config = GeotrustConfig::load(Some(&path)).unwrap();
    assert_eq!(config.storage.effective_path().to_str(), Some("from-file.db"));
    assert_eq!(config.storage.query_timeout_ms, Some(4000));
    assert_eq!(config.run_lock.effective_on_stale(), StaleLockPolicy::Refuse);

    clear_geotrust_env_vars();
}

#[test]
fn load_missing_explicit_file_is_an_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_geotrust_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    let result = GeotrustConfig::load(Some(&dir.path().join("absent.toml")));
    assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
}

#[test]
fn unparseable_env_value_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_geotrust_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("geotrust.toml");
    std::fs::write(&path, "").unwrap();
    std::env::set_var("GEOTRUST_STALE_LOCK_SECS", "ten minutes");

    let result = GeotrustConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::ValidationFailed { ref field, .. }) if field == "GEOTRUST_STALE_LOCK_SECS"));

    clear_geotrust_env_vars();
}

#[test]
fn toml_roundtrip_preserves_slos() {
    let mut config = GeotrustConfig::default();
    config.slo.targets = config.slo.effective_targets();
    let text = config.to_toml().unwrap();
    let parsed = GeotrustConfig::from_toml(&text).unwrap();
    assert_eq!(parsed.slo.targets, config.slo.targets);
}
