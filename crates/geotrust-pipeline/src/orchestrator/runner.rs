//! Orchestrator: runs INIT → CONNECT → VALIDATE → SNAPSHOT → EVALUATE_SLO →
//! ALERT_AND_TICKET → DONE once, with ABORTED reachable from any stage.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use geotrust_core::config::{GeotrustConfig, StaleLockPolicy};
use geotrust_core::constants::{DEFAULT_TREND_WINDOW, METRIC_VERIFICATION_RATE};
use geotrust_core::errors::{GeotrustErrorCode, PipelineError, StorageError};
use geotrust_core::events::{
    ErrorEvent, EventDispatcher, PipelineEventHandler, RunCompleteEvent, RunStartedEvent,
    StageCompletedEvent,
};
use geotrust_core::models::{
    Geofence, RunInput, RunLock, StoreRecord, TransactionRecord, VerificationSummary,
};
use geotrust_core::traits::PipelineStore;
use geotrust_core::tracing::fields;

use super::connector::{Connector, SqliteConnector};
use super::report::{RunReport, StageRecord};
use super::state::{transition, PipelineState, StageOutcome};
use crate::alerts::AlertGenerator;
use crate::classifier::{classify, RegistryIndex};
use crate::integrity::{CheckInput, IntegrityChecker, IntegrityReport};
use crate::issue::{IssueKind, StageIssue};
use crate::notify::LoggingEventHandler;
use crate::slo::{MetricSet, SloEvaluator};
use crate::snapshot::{build_snapshot, SnapshotRecorder};
use crate::tickets::TicketGenerator;

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Mutable state of one run.
struct Run {
    report: RunReport,
    state: PipelineState,
    lock_held: bool,
}

/// Everything VALIDATE produces for the later stages.
struct Validated {
    stores: Vec<StoreRecord>,
    transactions: Vec<TransactionRecord>,
    index: RegistryIndex,
    summary: VerificationSummary,
    integrity: IntegrityReport,
}

pub struct Orchestrator {
    config: GeotrustConfig,
    connector: Arc<dyn Connector>,
    checker: IntegrityChecker,
    events: EventDispatcher,
    clock: Clock,
}

impl Orchestrator {
    /// SQLite connector, the four standard checks, and the logging handler.
    pub fn new(config: GeotrustConfig) -> Self {
        let mut events = EventDispatcher::new();
        events.register(Arc::new(LoggingEventHandler));
        Self {
            config,
            connector: Arc::new(SqliteConnector),
            checker: IntegrityChecker::new(),
            events,
            clock: Arc::new(Utc::now),
        }
    }

    pub fn with_connector(mut self, connector: Arc<dyn Connector>) -> Self {
        self.connector = connector;
        self
    }

    pub fn with_checker(mut self, checker: IntegrityChecker) -> Self {
        self.checker = checker;
        self
    }

    pub fn with_handler(mut self, handler: Arc<dyn PipelineEventHandler>) -> Self {
        self.events.register(handler);
        self
    }

    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    pub fn config(&self) -> &GeotrustConfig {
        &self.config
    }

    /// Execute one run. Never panics on stage failures; every outcome is in
    /// the returned report.
    pub fn run(&self) -> RunReport {
        let started_at = (self.clock)();
        let run_id = uuid::Uuid::new_v4().to_string();
        let span = tracing::info_span!("geotrust.run", run_id = %run_id);
        let _guard = span.enter();

        self.events.emit_run_started(&RunStartedEvent {
            run_id: run_id.clone(),
        });
        let mut run = Run {
            report: RunReport::new(run_id, started_at),
            state: PipelineState::Init,
            lock_held: false,
        };

        // INIT
        let t = Instant::now();
        match GeotrustConfig::validate(&self.config) {
            Ok(()) => self.step(&mut run, StageOutcome::Completed, None, t),
            Err(e) => {
                let message = e.to_string();
                self.record_fatal(&mut run, IssueKind::Configuration, &message, e.error_code());
                self.step(&mut run, StageOutcome::Fatal, Some(message), t);
                return self.finish(run, None);
            }
        }

        // CONNECT
        let t = Instant::now();
        let store = match self.connect(&mut run) {
            Ok(store) => {
                self.step(&mut run, StageOutcome::Completed, None, t);
                store
            }
            Err(e) => {
                let message = e.to_string();
                self.record_fatal(&mut run, IssueKind::Connectivity, &message, e.error_code());
                self.step(&mut run, StageOutcome::Fatal, Some(message), t);
                return self.finish(run, None);
            }
        };
        let store: &dyn PipelineStore = store.as_ref();

        // VALIDATE
        let t = Instant::now();
        let geofence = self.config.geofence.effective_geofence();
        let validated = match self.validate(store, &geofence) {
            Ok(validated) => validated,
            Err(e) => {
                let message = format!("could not load registry or transactions: {e}");
                self.record_fatal(&mut run, IssueKind::Connectivity, &message, e.error_code());
                self.step(&mut run, StageOutcome::Fatal, Some(message), t);
                return self.finish(run, Some(store));
            }
        };
        let input = CheckInput {
            stores: &validated.stores,
            transactions: &validated.transactions,
            index: &validated.index,
            geofence: &geofence,
        };
        run.report.verification = Some(validated.summary);
        run.report.integrity = Some(validated.integrity.clone());
        let (outcome, reason) = if validated.integrity.status.is_fail() {
            for failing in validated.integrity.failing() {
                run.report.issues.push(
                    StageIssue::new(
                        PipelineState::Validate.as_str(),
                        IssueKind::ValidationFailure,
                        failing.details.clone(),
                    )
                    .with_subject(failing.key()),
                );
            }
            (
                StageOutcome::Failed,
                Some(format!(
                    "{} of {} integrity checks failed ({} violations)",
                    validated.integrity.failing_count(),
                    validated.integrity.results.len(),
                    validated.integrity.total_violations
                )),
            )
        } else {
            (StageOutcome::Completed, None)
        };
        self.step(&mut run, outcome, reason, t);

        // SNAPSHOT
        let t = Instant::now();
        let snapshot = build_snapshot(
            &run.report.run_id,
            started_at,
            &validated.integrity,
            &validated.summary,
        );
        let recorder = SnapshotRecorder::new(store).with_window(DEFAULT_TREND_WINDOW);
        let (outcome, reason) = match recorder.record(snapshot) {
            Ok(recorded) => {
                run.report.snapshot = Some(recorded);
                (StageOutcome::Completed, None)
            }
            Err(e) => {
                let message = format!("snapshot not recorded: {e}");
                run.report.issues.push(
                    StageIssue::new(
                        PipelineState::Snapshot.as_str(),
                        IssueKind::SnapshotFailure,
                        message.clone(),
                    )
                    .with_error_code(e.error_code()),
                );
                (StageOutcome::Failed, Some(message))
            }
        };
        self.step(&mut run, outcome, reason, t);

        // EVALUATE_SLO
        let t = Instant::now();
        let newest = validated.transactions.iter().map(|txn| txn.timestamp).max();
        let metrics = MetricSet::compute(
            &validated.integrity,
            &validated.summary,
            validated.stores.len(),
            newest,
            started_at,
        );
        let slos = SloEvaluator::new(self.config.slo.effective_targets()).evaluate(&metrics);
        let breaches: Vec<&str> = slos
            .iter()
            .filter(|s| s.is_breach())
            .map(|s| s.slo_name.as_str())
            .collect();
        let (outcome, reason) = if breaches.is_empty() {
            (StageOutcome::Completed, None)
        } else {
            for eval in slos.iter().filter(|s| s.is_breach()) {
                run.report.issues.push(
                    StageIssue::new(
                        PipelineState::EvaluateSlo.as_str(),
                        IssueKind::SloBreach,
                        eval.details.clone().unwrap_or_default(),
                    )
                    .with_subject(eval.slo_name.clone()),
                );
            }
            (
                StageOutcome::Failed,
                Some(format!("SLO breached: {}", breaches.join(", "))),
            )
        };
        tracing::info!(
            { fields::VERIFICATION_RATE } = metrics.get(METRIC_VERIFICATION_RATE),
            { fields::TOTAL_VIOLATIONS } = validated.integrity.total_violations,
            breaches = breaches.len(),
            "SLOs evaluated"
        );
        run.report.metrics = Some(metrics);
        run.report.slos = slos.clone();
        self.step(&mut run, outcome, reason, t);

        // ALERT_AND_TICKET
        let t = Instant::now();
        let now = (self.clock)();
        let day = run.report.day;
        let alerts = AlertGenerator::new(store)
            .with_events(&self.events)
            .generate(&validated.integrity.results, &slos, day, now);
        let generator = TicketGenerator::new(store, self.config.tickets.effective_sample_size())
            .with_events(&self.events);
        let mut tickets = generator.generate(&validated.integrity, &input, day, now);
        if self.config.tickets.effective_auto_resolve() {
            tickets.merge(generator.resolve_tickets(&input, now));
        }
        let failures = alerts.failures.len() + tickets.failures.len();
        run.report.issues.extend(alerts.failures.iter().cloned());
        run.report.issues.extend(tickets.failures.iter().cloned());
        let (outcome, reason) = if failures == 0 {
            (StageOutcome::Completed, None)
        } else {
            (
                StageOutcome::Failed,
                Some(format!(
                    "{} alert and {} ticket item(s) could not be persisted",
                    alerts.failures.len(),
                    tickets.failures.len()
                )),
            )
        };
        tracing::info!(
            alerts_created = alerts.created.len(),
            alerts_skipped = alerts.skipped_duplicates,
            tickets_created = tickets.created.len(),
            tickets_skipped = tickets.skipped_duplicates,
            tickets_resolved = tickets.resolved.len(),
            "alerts and tickets processed"
        );
        run.report.alerts = Some(alerts);
        run.report.tickets = Some(tickets);
        self.step(&mut run, outcome, reason, t);

        self.finish(run, Some(store))
    }

    /// Record the end of the current stage and move to the next state.
    fn step(&self, run: &mut Run, outcome: StageOutcome, reason: Option<String>, started: Instant) {
        let stage = run.state;
        let (next, status) = transition(stage, outcome);
        let duration_ms = started.elapsed().as_millis() as u64;

        run.report.status = run.report.status.worst(status);
        tracing::info!(
            { fields::STAGE } = stage.as_str(),
            outcome = ?outcome,
            status = %status,
            { fields::STAGE_DURATION_MS } = duration_ms,
            "stage finished"
        );
        self.events.emit_stage_completed(&StageCompletedEvent {
            run_id: run.report.run_id.clone(),
            stage: stage.as_str().to_string(),
            status,
            reason: reason.clone(),
            duration_ms,
        });
        run.report.stages.push(StageRecord {
            stage,
            outcome,
            status,
            reason,
            duration_ms,
        });
        run.state = next;
    }

    fn record_fatal(&self, run: &mut Run, kind: IssueKind, message: &str, code: &str) {
        tracing::error!(stage = run.state.as_str(), error_code = code, "{message}");
        self.events.emit_error(&ErrorEvent {
            stage: run.state.as_str().to_string(),
            message: message.to_string(),
            error_code: code.to_string(),
        });
        run.report.issues.push(
            StageIssue::new(run.state.as_str(), kind, message).with_error_code(code),
        );
    }

    /// Open the store, check it answers, and take the run lock.
    fn connect(&self, run: &mut Run) -> Result<Arc<dyn PipelineStore>, PipelineError> {
        let store = self
            .connector
            .connect(&self.config.storage)
            .map_err(|e| PipelineError::Connectivity {
                message: e.to_string(),
            })?;
        store.ping().map_err(|e| PipelineError::Connectivity {
            message: e.to_string(),
        })?;
        self.acquire_lock(store.as_ref(), &run.report.run_id)?;
        run.lock_held = true;
        Ok(store)
    }

    fn acquire_lock(&self, store: &dyn PipelineStore, run_id: &str) -> Result<(), PipelineError> {
        let now = (self.clock)();
        let lock = RunLock {
            holder: run_id.to_string(),
            acquired_at: now,
        };
        if store.try_acquire_lock(&lock)? {
            return Ok(());
        }

        let Some(existing) = store.current_lock()? else {
            // Released between the two calls.
            if store.try_acquire_lock(&lock)? {
                return Ok(());
            }
            return Err(PipelineError::RunInProgress {
                holder: "unknown".to_string(),
                age_secs: 0,
            });
        };

        let age_secs = existing.age_secs(now);
        let stale_after = i64::try_from(self.config.run_lock.effective_stale_after_secs())
            .unwrap_or(i64::MAX);
        if age_secs < stale_after {
            return Err(PipelineError::RunInProgress {
                holder: existing.holder,
                age_secs,
            });
        }

        match self.config.run_lock.effective_on_stale() {
            StaleLockPolicy::Refuse => Err(PipelineError::StaleRunLock {
                holder: existing.holder,
                age_secs,
            }),
            StaleLockPolicy::ForceClear => {
                tracing::warn!(
                    holder = %existing.holder,
                    age_secs,
                    "clearing stale run marker"
                );
                store.clear_lock(&existing)?;
                if store.try_acquire_lock(&lock)? {
                    Ok(())
                } else {
                    let holder = store
                        .current_lock()?
                        .map(|l| l.holder)
                        .unwrap_or_else(|| "unknown".to_string());
                    Err(PipelineError::RunInProgress { holder, age_secs: 0 })
                }
            }
        }
    }

    /// Load the registry and transactions, classify, and run the checks.
    fn validate(&self, store: &dyn PipelineStore, geofence: &Geofence) -> Result<Validated, StorageError> {
        let RunInput {
            stores,
            transactions,
        } = store.load_run_input()?;
        let index = RegistryIndex::from_stores(&stores);

        let judgments = classify(&transactions, &index);
        let summary = VerificationSummary::from_judgments(&judgments);
        let integrity = self.checker.run(&CheckInput {
            stores: &stores,
            transactions: &transactions,
            index: &index,
            geofence,
        });
        tracing::debug!(
            stores = stores.len(),
            transactions = transactions.len(),
            verified = summary.verified,
            "classification complete"
        );
        Ok(Validated {
            stores,
            transactions,
            index,
            summary,
            integrity,
        })
    }

    /// Record history, release the lock, checkpoint, and notify. Bookkeeping failures are
    /// reported as issues without changing the run status.
    fn finish(&self, mut run: Run, store: Option<&dyn PipelineStore>) -> RunReport {
        let finished_at = (self.clock)();
        run.report.finalize(run.state, finished_at);

        if let Some(store) = store {
            if let Err(e) = store.record_run(&run.report.history_record()) {
                tracing::warn!(error = %e, "failed to record run history");
                run.report.issues.push(
                    StageIssue::new(run.state.as_str(), IssueKind::RunBookkeeping, format!("run history not recorded: {e}"))
                        .with_error_code(e.error_code()),
                );
            }
            if run.lock_held {
                match store.release_lock(&run.report.run_id) {
                    Ok(true) => {}
                    Ok(false) => {
                        tracing::warn!("run marker was no longer held at release");
                        run.report.issues.push(StageIssue::new(
                            run.state.as_str(),
                            IssueKind::RunBookkeeping,
                            "run marker was no longer held at release",
                        ));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to release run marker");
                        run.report.issues.push(
                            StageIssue::new(run.state.as_str(), IssueKind::RunBookkeeping, format!("run marker not released: {e}"))
                                .with_error_code(e.error_code()),
                        );
                    }
                }
            }
            if let Err(e) = store.checkpoint() {
                tracing::warn!(error = %e, "wal checkpoint failed");
                run.report.issues.push(
                    StageIssue::new(run.state.as_str(), IssueKind::RunBookkeeping, format!("wal checkpoint failed: {e}"))
                        .with_error_code(e.error_code()),
                );
            }
        }

        self.events.emit_run_complete(&RunCompleteEvent {
            run_id: run.report.run_id.clone(),
            status: run.report.status,
            exit_code: run.report.exit_code,
            worst_stage: run.report.worst_stage.map(|s| s.as_str().to_string()),
            reason: run.report.reason.clone(),
            summary: run.report.summary(),
        });
        run.report
    }
}
