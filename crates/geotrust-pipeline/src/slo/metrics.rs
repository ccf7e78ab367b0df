//! Named metrics computed from the integrity report and the judgment set.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use geotrust_core::constants::{
    CATEGORY_CORE_INTEGRITY, CATEGORY_COVERAGE, CATEGORY_GEOFENCE_BOUNDS,
    CATEGORY_UNKNOWN_MUNICIPALITY, METRIC_CORE_INTEGRITY_VIOLATIONS, METRIC_COVERAGE_GAP_STORES,
    METRIC_DATA_FRESHNESS_HOURS, METRIC_GEOFENCE_VIOLATIONS, METRIC_REGISTRY_STORE_COUNT,
    METRIC_TOTAL_VIOLATIONS, METRIC_TRANSACTION_COUNT, METRIC_UNKNOWN_MUNICIPALITY,
    METRIC_VERIFICATION_RATE,
};
use geotrust_core::models::VerificationSummary;
use serde::Serialize;

use crate::integrity::IntegrityReport;

/// `round(100 * verified / total, 2)`, or `100.0` for an empty set.
pub fn verification_rate(verified: u64, total: u64) -> f64 {
    if total == 0 {
        return 100.0;
    }
    round2(100.0 * verified as f64 / total as f64)
}

/// Hours between the newest transaction and `now`, `0.0` when there are none.
/// Future-dated transactions count as fresh.
pub fn data_freshness_hours(newest: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    match newest {
        Some(ts) => {
            let secs = (now - ts).num_seconds().max(0);
            round2(secs as f64 / 3600.0)
        }
        None => 0.0,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Metric name → value for one run. Ordered for stable reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MetricSet {
    values: BTreeMap<String, f64>,
}

impl MetricSet {
    /// Compute the full catalogue. Check-derived metrics are omitted when the
    /// corresponding check was not part of the report.
    pub fn compute(
        report: &IntegrityReport,
        summary: &VerificationSummary,
        registry_store_count: usize,
        newest_transaction: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        let mut set = Self::default();
        set.insert(
            METRIC_VERIFICATION_RATE,
            verification_rate(summary.verified, summary.total),
        );
        set.insert(METRIC_TOTAL_VIOLATIONS, report.total_violations as f64);
        set.insert(METRIC_TRANSACTION_COUNT, summary.total as f64);
        set.insert(METRIC_REGISTRY_STORE_COUNT, registry_store_count as f64);
        set.insert(
            METRIC_DATA_FRESHNESS_HOURS,
            data_freshness_hours(newest_transaction, now),
        );

        let by_category = [
            (CATEGORY_CORE_INTEGRITY, METRIC_CORE_INTEGRITY_VIOLATIONS),
            (CATEGORY_GEOFENCE_BOUNDS, METRIC_GEOFENCE_VIOLATIONS),
            (CATEGORY_COVERAGE, METRIC_COVERAGE_GAP_STORES),
            (CATEGORY_UNKNOWN_MUNICIPALITY, METRIC_UNKNOWN_MUNICIPALITY),
        ];
        for (category, metric) in by_category {
            if let Some(result) = report.by_category(category) {
                set.insert(metric, result.violation_count as f64);
            }
        }
        set
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
