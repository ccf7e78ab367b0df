//! PipelineEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for observing a pipeline run.
///
/// Handlers override only the events they care about. Notification delivery
/// (chat webhooks, email) is implemented as a handler of `on_run_complete`.
pub trait PipelineEventHandler: Send + Sync {
    fn on_run_started(&self, _event: &RunStartedEvent) {}
    fn on_stage_completed(&self, _event: &StageCompletedEvent) {}
    fn on_alert_created(&self, _event: &AlertCreatedEvent) {}
    fn on_ticket_created(&self, _event: &TicketCreatedEvent) {}
    fn on_ticket_resolved(&self, _event: &TicketResolvedEvent) {}
    fn on_run_complete(&self, _event: &RunCompleteEvent) {}
    fn on_error(&self, _event: &ErrorEvent) {}
}
