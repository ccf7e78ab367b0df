//! Non-fatal problems accumulated during a run.

use serde::Serialize;

/// What went wrong, in terms of the run's error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Configuration,
    Connectivity,
    ValidationFailure,
    SnapshotFailure,
    SloBreach,
    AlertPersistenceFailure,
    TicketPersistenceFailure,
    RunBookkeeping,
}

/// One recorded issue. Issues never abort a run on their own; the stage
/// that produced them decides the status contribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageIssue {
    pub stage: String,
    pub kind: IssueKind,
    /// The item the issue concerns (check key, SLO name, store id).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl StageIssue {
    pub fn new(stage: impl Into<String>, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            kind,
            subject: None,
            message: message.into(),
            error_code: None,
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_error_code(mut self, code: &str) -> Self {
        self.error_code = Some(code.to_string());
        self
    }
}
