//! Integrity check types: the check trait, its input, and the aggregated report.

use geotrust_core::models::{
    CheckStatus, Geofence, IntegrityCheckResult, StoreRecord, TransactionRecord,
};
use serde::Serialize;

use crate::classifier::RegistryIndex;

/// Immutable view of everything a check may look at.
#[derive(Debug, Clone, Copy)]
pub struct CheckInput<'a> {
    pub stores: &'a [StoreRecord],
    pub transactions: &'a [TransactionRecord],
    pub index: &'a RegistryIndex,
    pub geofence: &'a Geofence,
}

/// A single integrity check. Checks must not mutate anything and must not
/// depend on one another.
pub trait IntegrityCheck: Send + Sync {
    fn category(&self) -> &'static str;
    fn name(&self) -> &'static str;
    fn run(&self, input: &CheckInput<'_>) -> IntegrityCheckResult;
}

/// The ordered list of check results for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegrityReport {
    pub status: CheckStatus,
    pub total_violations: u64,
    pub results: Vec<IntegrityCheckResult>,
}

impl IntegrityReport {
    /// Aggregate status is FAIL iff any check failed. A check fails when it
    /// reports violations or when it could not complete.
    pub fn from_results(results: Vec<IntegrityCheckResult>) -> Self {
        let total_violations = results.iter().map(|r| r.violation_count).sum();
        let status = if results.iter().any(|r| r.status.is_fail()) {
            CheckStatus::Fail
        } else {
            CheckStatus::Pass
        };
        Self {
            status,
            total_violations,
            results,
        }
    }

    pub fn failing(&self) -> impl Iterator<Item = &IntegrityCheckResult> {
        self.results.iter().filter(|r| r.status.is_fail())
    }

    pub fn failing_count(&self) -> usize {
        self.failing().count()
    }

    /// First result in the given category.
    pub fn by_category(&self, category: &str) -> Option<&IntegrityCheckResult> {
        self.results.iter().find(|r| r.category == category)
    }
}
