//! Ticket planning and persistence.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, NaiveDate, Utc};
use geotrust_core::constants::{
    CATEGORY_COVERAGE, CATEGORY_UNKNOWN_MUNICIPALITY, MAX_TICKET_SAMPLE_SIZE, UNKNOWN_MUNICIPALITY,
};
use geotrust_core::errors::GeotrustErrorCode;
use geotrust_core::events::{EventDispatcher, TicketCreatedEvent, TicketResolvedEvent};
use geotrust_core::models::{StoreRecord, Ticket, TicketReason, TicketStatus, TransactionRecord};
use geotrust_core::traits::TicketRepository;
use serde::Serialize;

use super::document::TicketDocument;
use crate::classifier::{is_unknown_municipality, is_verified};
use crate::integrity::{CheckInput, IntegrityReport};
use crate::issue::{IssueKind, StageIssue};

const STAGE: &str = "ALERT_AND_TICKET";

/// What a ticket for one store will contain, before rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketPlan {
    pub store_id: i64,
    pub reason: TicketReason,
    pub transaction_count: u64,
    pub sample_transaction_ids: Vec<String>,
    pub municipality: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TicketKey {
    pub store_id: i64,
    pub day: NaiveDate,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TicketOutcome {
    pub created: Vec<Ticket>,
    pub skipped_duplicates: usize,
    pub resolved: Vec<TicketKey>,
    pub failures: Vec<StageIssue>,
}

impl TicketOutcome {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn merge(&mut self, other: TicketOutcome) {
        self.created.extend(other.created);
        self.skipped_duplicates += other.skipped_duplicates;
        self.resolved.extend(other.resolved);
        self.failures.extend(other.failures);
    }
}

/// Plan one ticket per store named by the Coverage or Unknown Municipality
/// results, ordered by `store_id`.
///
/// Counts and samples cover the store's unverified transactions. Samples are
/// the lexicographically smallest ids, at most [`MAX_TICKET_SAMPLE_SIZE`]. The observed municipality is the most
/// frequent claim other than the sentinel (ties alphabetical), falling back to
/// the registered municipality and then to the sentinel itself.
pub fn plan_tickets(
    report: &IntegrityReport,
    input: &CheckInput<'_>,
    sample_size: usize,
) -> Vec<TicketPlan> {
    let targets: BTreeSet<i64> = [CATEGORY_COVERAGE, CATEGORY_UNKNOWN_MUNICIPALITY]
        .iter()
        .filter_map(|category| report.by_category(category))
        .flat_map(|result| result.store_ids.iter().copied())
        .collect();
    if targets.is_empty() {
        return Vec::new();
    }

    let mut by_store: HashMap<i64, Vec<&TransactionRecord>> = HashMap::new();
    for txn in input.transactions {
        if let Some(id) = txn.store_id.filter(|id| targets.contains(id)) {
            by_store.entry(id).or_default().push(txn);
        }
    }
    let registered: HashMap<i64, &StoreRecord> =
        input.stores.iter().map(|s| (s.store_id, s)).collect();

    let mut plans = Vec::with_capacity(targets.len());
    for store_id in targets {
        let txns = by_store.get(&store_id).map(Vec::as_slice).unwrap_or(&[]);
        let mut unverified: Vec<&str> = txns
            .iter()
            .filter(|t| !is_verified(t, input.index))
            .map(|t| t.transaction_id.as_str())
            .collect();
        if unverified.is_empty() {
            continue;
        }
        unverified.sort_unstable();

        let reason = if input.index.contains(store_id) {
            TicketReason::UnknownMunicipality
        } else {
            TicketReason::UnregisteredStore
        };
        let municipality = observed_municipality(txns)
            .or_else(|| registered.get(&store_id).map(|s| s.municipality.clone()))
            .unwrap_or_else(|| UNKNOWN_MUNICIPALITY.to_string());

        plans.push(TicketPlan {
            store_id,
            reason,
            transaction_count: unverified.len() as u64,
            sample_transaction_ids: unverified
                .iter()
                .take(sample_size.min(MAX_TICKET_SAMPLE_SIZE))
                .map(|id| id.to_string())
                .collect(),
            municipality,
        });
    }
    plans
}

fn observed_municipality(txns: &[&TransactionRecord]) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for txn in txns {
        if !is_unknown_municipality(&txn.claimed_municipality) {
            *counts.entry(txn.claimed_municipality.as_str()).or_default() += 1;
        }
    }
    // BTreeMap iterates alphabetically; keep the first of equal maxima.
    let mut best: Option<(&str, usize)> = None;
    for (name, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((name, count));
        }
    }
    best.map(|(name, _)| name.to_string())
}

pub struct TicketGenerator<'a, R: TicketRepository + ?Sized> {
    repo: &'a R,
    sample_size: usize,
    events: Option<&'a EventDispatcher>,
}

impl<'a, R: TicketRepository + ?Sized> TicketGenerator<'a, R> {
    pub fn new(repo: &'a R, sample_size: usize) -> Self {
        Self {
            repo,
            sample_size,
            events: None,
        }
    }

    pub fn with_events(mut self, events: &'a EventDispatcher) -> Self {
        self.events = Some(events);
        self
    }

    /// Create missing tickets for `day`. A failure for one store is recorded
    /// and does not stop the others.
    pub fn generate(
        &self,
        report: &IntegrityReport,
        input: &CheckInput<'_>,
        day: NaiveDate,
        now: DateTime<Utc>,
    ) -> TicketOutcome {
        let mut outcome = TicketOutcome::default();

        for plan in plan_tickets(report, input, self.sample_size) {
            let registered = input.stores.iter().find(|s| s.store_id == plan.store_id);
            let document = TicketDocument {
                store_id: plan.store_id,
                day,
                reason: plan.reason,
                transaction_count: plan.transaction_count,
                sample_transaction_ids: &plan.sample_transaction_ids,
                municipality: &plan.municipality,
                registered,
                geofence: input.geofence,
            }
            .render();

            let ticket = Ticket {
                store_id: plan.store_id,
                day,
                created_at: now,
                reason: plan.reason,
                transaction_count: plan.transaction_count,
                sample_transaction_ids: plan.sample_transaction_ids,
                municipality: plan.municipality,
                status: TicketStatus::Open,
                resolved_at: None,
                document,
            };

            match self.repo.create_ticket_if_absent(&ticket) {
                Ok(true) => {
                    tracing::info!(
                        store_id = ticket.store_id,
                        reason = %ticket.reason,
                        transactions = ticket.transaction_count,
                        "ticket created"
                    );
                    if let Some(events) = self.events {
                        events.emit_ticket_created(&TicketCreatedEvent {
                            store_id: ticket.store_id,
                            day,
                            reason: ticket.reason,
                            transaction_count: ticket.transaction_count,
                        });
                    }
                    outcome.created.push(ticket);
                }
                Ok(false) => outcome.skipped_duplicates += 1,
                Err(e) => {
                    tracing::warn!(store_id = ticket.store_id, error = %e, "failed to persist ticket");
                    outcome.failures.push(
                        StageIssue::new(STAGE, IssueKind::TicketPersistenceFailure, e.to_string())
                            .with_subject(format!("store {}", ticket.store_id))
                            .with_error_code(e.error_code()),
                    );
                }
            }
        }
        outcome
    }

    /// Resolve open tickets whose store is now registered and has no
    /// unverified transactions left.
    pub fn resolve_tickets(&self, input: &CheckInput<'_>, now: DateTime<Utc>) -> TicketOutcome {
        let mut outcome = TicketOutcome::default();

        let open = match self.repo.open_tickets() {
            Ok(open) => open,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load open tickets");
                outcome.failures.push(
                    StageIssue::new(STAGE, IssueKind::TicketPersistenceFailure, e.to_string())
                        .with_error_code(e.error_code()),
                );
                return outcome;
            }
        };
        if open.is_empty() {
            return outcome;
        }

        let still_unverified: BTreeSet<i64> = input
            .transactions
            .iter()
            .filter(|t| !is_verified(t, input.index))
            .filter_map(|t| t.store_id)
            .collect();

        for ticket in open {
            if !input.index.contains(ticket.store_id) || still_unverified.contains(&ticket.store_id) {
                continue;
            }
            match self.repo.resolve_ticket(ticket.store_id, ticket.day, now) {
                Ok(true) => {
                    tracing::info!(store_id = ticket.store_id, day = %ticket.day, "ticket resolved");
                    if let Some(events) = self.events {
                        events.emit_ticket_resolved(&TicketResolvedEvent {
                            store_id: ticket.store_id,
                            day: ticket.day,
                        });
                    }
                    outcome.resolved.push(TicketKey {
                        store_id: ticket.store_id,
                        day: ticket.day,
                    });
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(store_id = ticket.store_id, error = %e, "failed to resolve ticket");
                    outcome.failures.push(
                        StageIssue::new(STAGE, IssueKind::TicketPersistenceFailure, e.to_string())
                            .with_subject(format!("store {}", ticket.store_id))
                            .with_error_code(e.error_code()),
                    );
                }
            }
        }
        outcome
    }
}
