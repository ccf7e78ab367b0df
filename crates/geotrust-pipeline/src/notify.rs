//! Default notification handler: run events become structured log lines.
//! Channel-specific delivery is a separate `PipelineEventHandler`.

use geotrust_core::events::{
    AlertCreatedEvent, ErrorEvent, PipelineEventHandler, RunCompleteEvent, RunStartedEvent,
    StageCompletedEvent, TicketCreatedEvent, TicketResolvedEvent,
};
use geotrust_core::models::RunStatus;

#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingEventHandler;

impl PipelineEventHandler for LoggingEventHandler {
    fn on_run_started(&self, event: &RunStartedEvent) {
        tracing::info!(run_id = %event.run_id, "run started");
    }

    fn on_stage_completed(&self, event: &StageCompletedEvent) {
        tracing::debug!(
            run_id = %event.run_id,
            stage = %event.stage,
            status = %event.status,
            duration_ms = event.duration_ms,
            reason = event.reason.as_deref().unwrap_or(""),
            "stage completed"
        );
    }

    fn on_alert_created(&self, event: &AlertCreatedEvent) {
        tracing::warn!(severity = %event.severity, dedup_key = %event.dedup_key, "{}", event.message);
    }

    fn on_ticket_created(&self, event: &TicketCreatedEvent) {
        tracing::info!(
            store_id = event.store_id,
            day = %event.day,
            reason = %event.reason,
            "remediation ticket opened"
        );
    }

    fn on_ticket_resolved(&self, event: &TicketResolvedEvent) {
        tracing::info!(store_id = event.store_id, day = %event.day, "remediation ticket resolved");
    }

    fn on_run_complete(&self, event: &RunCompleteEvent) {
        match event.status {
            RunStatus::Success => tracing::info!(
                run_id = %event.run_id,
                status = %event.status,
                "{}",
                event.summary
            ),
            RunStatus::Warning => tracing::warn!(
                run_id = %event.run_id,
                status = %event.status,
                worst_stage = event.worst_stage.as_deref().unwrap_or(""),
                "{}",
                event.summary
            ),
            RunStatus::Error | RunStatus::Aborted => tracing::error!(
                run_id = %event.run_id,
                status = %event.status,
                worst_stage = event.worst_stage.as_deref().unwrap_or(""),
                reason = event.reason.as_deref().unwrap_or(""),
                "{}",
                event.summary
            ),
        }
    }

    fn on_error(&self, event: &ErrorEvent) {
        tracing::error!(
            stage = %event.stage,
            error_code = %event.error_code,
            "{}",
            event.message
        );
    }
}
