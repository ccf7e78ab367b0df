//! Alert Generator.
//!
//! Every FAILing check or SLO yields at most one alert per day, keyed by a
//! blake3 hash of its identity and the day. Persistence failures are recorded
//! and the next item is processed.

use chrono::{DateTime, NaiveDate, Utc};
use geotrust_core::constants::CATEGORY_SLO;
use geotrust_core::errors::GeotrustErrorCode;
use geotrust_core::events::{AlertCreatedEvent, EventDispatcher};
use geotrust_core::models::{Alert, IntegrityCheckResult, Severity, SloEvaluation};
use geotrust_core::traits::AlertRepository;
use serde::Serialize;

use crate::issue::{IssueKind, StageIssue};

const STAGE: &str = "ALERT_AND_TICKET";

/// Deterministic dedup key for `identity` (`category/name`) on `day`.
pub fn dedup_key(identity: &str, day: NaiveDate) -> String {
    let material = format!("{identity}|{}", day.format("%Y-%m-%d"));
    blake3::hash(material.as_bytes()).to_hex().to_string()
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AlertOutcome {
    pub created: Vec<Alert>,
    pub skipped_duplicates: usize,
    pub failures: Vec<StageIssue>,
}

impl AlertOutcome {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// An alert before persistence.
struct Candidate {
    category: String,
    name: String,
    message: String,
    severity: Severity,
}

pub struct AlertGenerator<'a, R: AlertRepository + ?Sized> {
    repo: &'a R,
    events: Option<&'a EventDispatcher>,
}

impl<'a, R: AlertRepository + ?Sized> AlertGenerator<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo, events: None }
    }

    pub fn with_events(mut self, events: &'a EventDispatcher) -> Self {
        self.events = Some(events);
        self
    }

    /// Create alerts for every FAILing check and SLO. Idempotent within `day`.
    pub fn generate(
        &self,
        checks: &[IntegrityCheckResult],
        slos: &[SloEvaluation],
        day: NaiveDate,
        now: DateTime<Utc>,
    ) -> AlertOutcome {
        let candidates = checks
            .iter()
            .filter(|c| c.status.is_fail())
            .map(check_candidate)
            .chain(slos.iter().filter(|s| s.is_breach()).map(slo_candidate));

        let mut outcome = AlertOutcome::default();
        for candidate in candidates {
            let identity = format!("{}/{}", candidate.category, candidate.name);
            let alert = Alert {
                id: uuid::Uuid::new_v4().to_string(),
                dedup_key: dedup_key(&identity, day),
                category: candidate.category,
                name: candidate.name,
                message: candidate.message,
                severity: candidate.severity,
                day,
                created_at: now,
            };

            match self.repo.insert_alert_if_absent(&alert) {
                Ok(true) => {
                    tracing::info!(
                        alert = %identity,
                        severity = %alert.severity,
                        "alert created"
                    );
                    if let Some(events) = self.events {
                        events.emit_alert_created(&AlertCreatedEvent {
                            dedup_key: alert.dedup_key.clone(),
                            severity: alert.severity,
                            message: alert.message.clone(),
                        });
                    }
                    outcome.created.push(alert);
                }
                Ok(false) => {
                    tracing::debug!(alert = %identity, "alert already raised today");
                    outcome.skipped_duplicates += 1;
                }
                Err(e) => {
                    tracing::warn!(alert = %identity, error = %e, "failed to persist alert");
                    outcome.failures.push(
                        StageIssue::new(STAGE, IssueKind::AlertPersistenceFailure, e.to_string())
                            .with_subject(identity)
                            .with_error_code(e.error_code()),
                    );
                }
            }
        }
        outcome
    }
}

fn check_candidate(result: &IntegrityCheckResult) -> Candidate {
    Candidate {
        category: result.category.clone(),
        name: result.name.clone(),
        message: format!(
            "[{}] {} failed with {} violation(s): {}",
            result.category, result.name, result.violation_count, result.details
        ),
        severity: Severity::High,
    }
}

fn slo_candidate(eval: &SloEvaluation) -> Candidate {
    Candidate {
        category: CATEGORY_SLO.to_string(),
        name: eval.slo_name.clone(),
        message: format!(
            "SLO {} breached: current {} {} target {}",
            eval.slo_name, eval.current_value, eval.operator, eval.target_value
        ),
        severity: eval.severity,
    }
}
