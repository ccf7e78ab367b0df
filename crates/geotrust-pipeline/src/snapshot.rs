//! Snapshot Recorder: appends one health snapshot per run and classifies the
//! verification-rate trend against recent history.

use chrono::{DateTime, Utc};
use geotrust_core::constants::{DEFAULT_TREND_WINDOW, TREND_DELTA_THRESHOLD};
use geotrust_core::errors::StorageError;
use geotrust_core::models::{HealthStatus, Snapshot, VerificationSummary};
use geotrust_core::traits::SnapshotRepository;
use serde::Serialize;

use crate::integrity::IntegrityReport;
use crate::slo::verification_rate;

/// Healthy with no failing checks, Degraded while fewer than half fail,
/// Unhealthy otherwise.
pub fn system_health(report: &IntegrityReport) -> HealthStatus {
    let failing = report.failing_count();
    if failing == 0 {
        HealthStatus::Healthy
    } else if failing * 2 < report.results.len() {
        HealthStatus::Degraded
    } else {
        HealthStatus::Unhealthy
    }
}

pub fn build_snapshot(
    run_id: &str,
    timestamp: DateTime<Utc>,
    report: &IntegrityReport,
    summary: &VerificationSummary,
) -> Snapshot {
    Snapshot {
        run_id: run_id.to_string(),
        timestamp,
        system_health: system_health(report),
        verification_rate: verification_rate(summary.verified, summary.total),
        total_violations: report.total_violations,
        transaction_count: summary.total,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Stable,
    Declining,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSummary {
    pub direction: TrendDirection,
    /// Recent average minus older average, in percentage points.
    pub delta: f64,
    /// Number of rates the classification looked at, current included.
    pub samples: usize,
}

/// Classify a series of verification rates, oldest first.
///
/// The newer half of the window is compared with the older half; a move of
/// more than [`TREND_DELTA_THRESHOLD`] points either way is a trend.
pub fn classify_trend(rates: &[f64]) -> TrendSummary {
    let n = rates.len();
    if n < 2 {
        return TrendSummary {
            direction: TrendDirection::Stable,
            delta: 0.0,
            samples: n,
        };
    }

    let split = n / 2;
    let older = &rates[..split];
    let recent = &rates[split..];
    let delta = mean(recent) - mean(older);

    let direction = if delta > TREND_DELTA_THRESHOLD {
        TrendDirection::Improving
    } else if delta < -TREND_DELTA_THRESHOLD {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    };
    TrendSummary {
        direction,
        delta: (delta * 100.0).round() / 100.0,
        samples: n,
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedSnapshot {
    pub id: i64,
    pub snapshot: Snapshot,
    /// Absent when history could not be read.
    pub trend: Option<TrendSummary>,
}

pub struct SnapshotRecorder<'a, R: SnapshotRepository + ?Sized> {
    repo: &'a R,
    window: usize,
}

impl<'a, R: SnapshotRepository + ?Sized> SnapshotRecorder<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self {
            repo,
            window: DEFAULT_TREND_WINDOW,
        }
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window.max(1);
        self
    }

    /// Append `snapshot`, then classify the trend over the most recent
    /// `window` snapshots (this one included). A failed history read only
    /// drops the trend; a failed append is an error.
    pub fn record(&self, snapshot: Snapshot) -> Result<RecordedSnapshot, StorageError> {
        let id = self.repo.append_snapshot(&snapshot)?;

        let trend = match self.repo.recent_snapshots(self.window) {
            Ok(history) => {
                let rates: Vec<f64> = history.iter().rev().map(|s| s.verification_rate).collect();
                Some(classify_trend(&rates))
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not read snapshot history; trend skipped");
                None
            }
        };

        tracing::info!(
            snapshot_id = id,
            health = %snapshot.system_health,
            verification_rate = snapshot.verification_rate,
            "snapshot recorded"
        );
        Ok(RecordedSnapshot {
            id,
            snapshot,
            trend,
        })
    }
}
