//! Event payloads emitted by the pipeline.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{RunStatus, Severity, TicketReason};

#[derive(Debug, Clone, Serialize)]
pub struct RunStartedEvent {
    pub run_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StageCompletedEvent {
    pub run_id: String,
    pub stage: String,
    pub status: RunStatus,
    pub reason: Option<String>,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlertCreatedEvent {
    pub dedup_key: String,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TicketCreatedEvent {
    pub store_id: i64,
    pub day: NaiveDate,
    pub reason: TicketReason,
    pub transaction_count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TicketResolvedEvent {
    pub store_id: i64,
    pub day: NaiveDate,
}

/// Final notification. Channel formatting belongs to the handler.
#[derive(Debug, Clone, Serialize)]
pub struct RunCompleteEvent {
    pub run_id: String,
    pub status: RunStatus,
    pub exit_code: i32,
    pub worst_stage: Option<String>,
    pub reason: Option<String>,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorEvent {
    pub stage: String,
    pub message: String,
    pub error_code: String,
}
