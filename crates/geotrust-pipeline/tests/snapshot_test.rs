//! Snapshot health, trend classification, and the recorder.

mod common;

use chrono::Duration;
use common::{at, engine_with};
use geotrust_core::models::{HealthStatus, IntegrityCheckResult, Snapshot, VerificationSummary};
use geotrust_core::traits::SnapshotRepository;
use geotrust_pipeline::integrity::IntegrityReport;
use geotrust_pipeline::snapshot::{
    build_snapshot, classify_trend, system_health, SnapshotRecorder, TrendDirection,
};

fn report_with_failures(failing: u64, total: u64) -> IntegrityReport {
    let results = (0..total)
        .map(|i| {
            let violations = if i < failing { 1 } else { 0 };
            IntegrityCheckResult::from_count(format!("Cat {i}"), "check", violations, "")
        })
        .collect();
    IntegrityReport::from_results(results)
}

fn snapshot(run: &str, hour: i64, rate: f64) -> Snapshot {
    Snapshot {
        run_id: run.to_string(),
        timestamp: at(0) + Duration::hours(hour),
        system_health: HealthStatus::Healthy,
        verification_rate: rate,
        total_violations: 0,
        transaction_count: 10,
    }
}

#[test]
fn health_thresholds() {
    assert_eq!(system_health(&report_with_failures(0, 4)), HealthStatus::Healthy);
    assert_eq!(system_health(&report_with_failures(1, 4)), HealthStatus::Degraded);
    assert_eq!(system_health(&report_with_failures(2, 4)), HealthStatus::Unhealthy);
    assert_eq!(system_health(&report_with_failures(4, 4)), HealthStatus::Unhealthy);
}

#[test]
fn build_snapshot_copies_run_figures() {
    let report = report_with_failures(1, 4);
    let summary = VerificationSummary {
        total: 4,
        verified: 3,
        unverified: 1,
    };
    let snap = build_snapshot("run-1", at(5), &report, &summary);
    assert_eq!(snap.run_id, "run-1");
    assert_eq!(snap.verification_rate, 75.0);
    assert_eq!(snap.total_violations, 1);
    assert_eq!(snap.transaction_count, 4);
    assert_eq!(snap.system_health, HealthStatus::Degraded);
}

#[test]
fn trend_classification() {
    assert_eq!(classify_trend(&[]).direction, TrendDirection::Stable);
    assert_eq!(classify_trend(&[50.0]).direction, TrendDirection::Stable);

    let improving = classify_trend(&[80.0, 82.0, 90.0, 92.0]);
    assert_eq!(improving.direction, TrendDirection::Improving);
    assert_eq!(improving.delta, 10.0);
    assert_eq!(improving.samples, 4);

    assert_eq!(
        classify_trend(&[95.0, 94.0, 85.0]).direction,
        TrendDirection::Declining
    );
    // Exactly at the threshold is not a trend.
    assert_eq!(classify_trend(&[90.0, 92.0]).direction, TrendDirection::Stable);
}

#[test]
fn recorder_appends_and_reports_trend() {
    let engine = engine_with(&[], &[]);
    let recorder = SnapshotRecorder::new(&engine).with_window(3);

    let first = recorder.record(snapshot("r1", 1, 60.0)).unwrap();
    assert_eq!(first.trend.as_ref().unwrap().samples, 1);

    recorder.record(snapshot("r2", 2, 60.0)).unwrap();
    recorder.record(snapshot("r3", 3, 90.0)).unwrap();
    let latest = recorder.record(snapshot("r4", 4, 95.0)).unwrap();

    // Window of 3: [60, 90, 95] -> older [60], recent [90, 95].
    let trend = latest.trend.unwrap();
    assert_eq!(trend.samples, 3);
    assert_eq!(trend.direction, TrendDirection::Improving);
    assert!(latest.id > first.id);

    let stored = engine.recent_snapshots(10).unwrap();
    assert_eq!(stored.len(), 4);
    assert_eq!(stored[0].run_id, "r4");
}
