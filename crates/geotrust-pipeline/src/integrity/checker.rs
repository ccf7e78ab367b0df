//! IntegrityChecker: runs every registered check over the same input.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

use geotrust_core::models::{CheckStatus, IntegrityCheckResult};
use geotrust_core::tracing::fields;
use rayon::prelude::*;

use super::types::{CheckInput, IntegrityCheck, IntegrityReport};
use super::{CoreIntegrityCheck, CoverageCheck, GeofenceBoundsCheck, UnknownMunicipalityCheck};

/// Runs checks in parallel. Results come back in registration order and
/// every check runs; one failing or panicking check never hides the rest.
pub struct IntegrityChecker {
    checks: Vec<Box<dyn IntegrityCheck>>,
}

impl IntegrityChecker {
    /// The four required checks.
    pub fn new() -> Self {
        Self {
            checks: vec![
                Box::new(CoreIntegrityCheck),
                Box::new(GeofenceBoundsCheck),
                Box::new(CoverageCheck),
                Box::new(UnknownMunicipalityCheck),
            ],
        }
    }

    /// Create a checker with custom checks.
    pub fn with_checks(checks: Vec<Box<dyn IntegrityCheck>>) -> Self {
        Self { checks }
    }

    pub fn register(&mut self, check: Box<dyn IntegrityCheck>) {
        self.checks.push(check);
    }

    pub fn check_count(&self) -> usize {
        self.checks.len()
    }

    pub fn run(&self, input: &CheckInput<'_>) -> IntegrityReport {
        let results: Vec<IntegrityCheckResult> = self
            .checks
            .par_iter()
            .map(|check| run_isolated(check.as_ref(), input))
            .collect();
        IntegrityReport::from_results(results)
    }
}

impl Default for IntegrityChecker {
    fn default() -> Self {
        Self::new()
    }
}

fn run_isolated(check: &dyn IntegrityCheck, input: &CheckInput<'_>) -> IntegrityCheckResult {
    let start = Instant::now();
    let outcome = catch_unwind(AssertUnwindSafe(|| check.run(input)));
    let elapsed_ms = start.elapsed().as_millis() as u64;

    match outcome {
        Ok(result) => {
            tracing::debug!(
                category = check.category(),
                name = check.name(),
                violations = result.violation_count,
                { fields::CHECK_DURATION_MS } = elapsed_ms,
                "integrity check finished"
            );
            result
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::error!(
                category = check.category(),
                name = check.name(),
                error = %message,
                "integrity check panicked"
            );
            IntegrityCheckResult {
                category: check.category().to_string(),
                name: check.name().to_string(),
                violation_count: 0,
                status: CheckStatus::Fail,
                details: format!("check did not complete: {message}"),
                store_ids: Vec::new(),
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
