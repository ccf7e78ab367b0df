//! Pipeline states and the pure transition function.

use std::fmt;

use geotrust_core::models::RunStatus;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PipelineState {
    Init,
    Connect,
    Validate,
    Snapshot,
    EvaluateSlo,
    AlertAndTicket,
    Done,
    Aborted,
}

impl PipelineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "INIT",
            Self::Connect => "CONNECT",
            Self::Validate => "VALIDATE",
            Self::Snapshot => "SNAPSHOT",
            Self::EvaluateSlo => "EVALUATE_SLO",
            Self::AlertAndTicket => "ALERT_AND_TICKET",
            Self::Done => "DONE",
            Self::Aborted => "ABORTED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Aborted)
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a stage ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageOutcome {
    Completed,
    /// The stage finished but found problems or could not persist its output.
    Failed,
    /// The run cannot continue.
    Fatal,
}

/// Next state and the status this step contributes to the run.
///
/// | state            | Completed        | Failed                     | Fatal   |
/// |------------------|------------------|----------------------------|---------|
/// | INIT             | CONNECT          | ABORTED                    | ABORTED |
/// | CONNECT          | VALIDATE         | ABORTED                    | ABORTED |
/// | VALIDATE         | SNAPSHOT         | SNAPSHOT, WARNING          | ABORTED |
/// | SNAPSHOT         | EVALUATE_SLO     | EVALUATE_SLO, WARNING      | ABORTED |
/// | EVALUATE_SLO     | ALERT_AND_TICKET | ALERT_AND_TICKET, ERROR    | ABORTED |
/// | ALERT_AND_TICKET | DONE             | DONE, WARNING              | ABORTED |
///
/// DONE and ABORTED are absorbing.
pub fn transition(state: PipelineState, outcome: StageOutcome) -> (PipelineState, RunStatus) {
    use PipelineState::*;
    use StageOutcome::*;

    match (state, outcome) {
        (Done, _) => (Done, RunStatus::Success),
        (Aborted, _) => (Aborted, RunStatus::Success),
        (_, Fatal) => (Aborted, RunStatus::Aborted),

        (Init, Completed) => (Connect, RunStatus::Success),
        (Init, Failed) | (Connect, Failed) => (Aborted, RunStatus::Aborted),

        (Connect, Completed) => (Validate, RunStatus::Success),

        (Validate, Completed) => (Snapshot, RunStatus::Success),
        (Validate, Failed) => (Snapshot, RunStatus::Warning),

        (Snapshot, Completed) => (EvaluateSlo, RunStatus::Success),
        (Snapshot, Failed) => (EvaluateSlo, RunStatus::Warning),

        (EvaluateSlo, Completed) => (AlertAndTicket, RunStatus::Success),
        (EvaluateSlo, Failed) => (AlertAndTicket, RunStatus::Error),

        (AlertAndTicket, Completed) => (Done, RunStatus::Success),
        (AlertAndTicket, Failed) => (Done, RunStatus::Warning),
    }
}
