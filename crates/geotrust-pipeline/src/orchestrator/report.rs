//! The structured report emitted once per run.

use chrono::{DateTime, NaiveDate, Utc};
use geotrust_core::models::{RunHistoryRecord, RunStatus, SloEvaluation, VerificationSummary};
use serde::Serialize;

use super::state::{PipelineState, StageOutcome};
use crate::alerts::AlertOutcome;
use crate::integrity::IntegrityReport;
use crate::issue::StageIssue;
use crate::slo::MetricSet;
use crate::snapshot::RecordedSnapshot;
use crate::tickets::TicketOutcome;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageRecord {
    pub stage: PipelineState,
    pub outcome: StageOutcome,
    /// Status this stage contributed.
    pub status: RunStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: String,
    pub day: NaiveDate,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub status: RunStatus,
    pub exit_code: i32,
    pub final_state: PipelineState,
    pub worst_stage: Option<PipelineState>,
    pub reason: Option<String>,
    pub stages: Vec<StageRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<VerificationSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integrity: Option<IntegrityReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricSet>,
    pub slos: Vec<SloEvaluation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<RecordedSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alerts: Option<AlertOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickets: Option<TicketOutcome>,
    pub issues: Vec<StageIssue>,
}

impl RunReport {
    pub(crate) fn new(run_id: String, started_at: DateTime<Utc>) -> Self {
        Self {
            run_id,
            day: started_at.date_naive(),
            started_at,
            finished_at: started_at,
            status: RunStatus::Success,
            exit_code: RunStatus::Success.exit_code(),
            final_state: PipelineState::Init,
            worst_stage: None,
            reason: None,
            stages: Vec::new(),
            verification: None,
            integrity: None,
            metrics: None,
            slos: Vec::new(),
            snapshot: None,
            alerts: None,
            tickets: None,
            issues: Vec::new(),
        }
    }

    /// The earliest stage that contributed the run's final status, if the
    /// run did not succeed.
    pub fn worst_stage_record(&self) -> Option<&StageRecord> {
        if self.status == RunStatus::Success {
            return None;
        }
        self.stages.iter().find(|s| s.status == self.status)
    }

    pub fn stage(&self, stage: PipelineState) -> Option<&StageRecord> {
        self.stages.iter().find(|s| s.stage == stage)
    }

    /// Fill in the derived fields once the run has ended.
    pub(crate) fn finalize(&mut self, final_state: PipelineState, finished_at: DateTime<Utc>) {
        self.final_state = final_state;
        self.finished_at = finished_at;
        self.exit_code = self.status.exit_code();
        let worst = self
            .worst_stage_record()
            .map(|s| (s.stage, s.reason.clone()));
        if let Some((stage, reason)) = worst {
            self.worst_stage = Some(stage);
            self.reason = reason;
        }
    }

    /// One line for notifications.
    pub fn summary(&self) -> String {
        let mut line = format!("run {} finished {} in {}", self.run_id, self.status, self.final_state);
        if let Some(summary) = &self.verification {
            line.push_str(&format!(
                "; {}/{} transactions verified",
                summary.verified, summary.total
            ));
        }
        if let Some(stage) = self.worst_stage {
            line.push_str(&format!("; worst stage {stage}"));
            if let Some(reason) = &self.reason {
                line.push_str(&format!(": {reason}"));
            }
        }
        line
    }

    pub fn history_record(&self) -> RunHistoryRecord {
        RunHistoryRecord {
            run_id: self.run_id.clone(),
            started_at: self.started_at,
            finished_at: self.finished_at,
            status: self.status,
            final_state: self.final_state.as_str().to_string(),
            worst_stage: self.worst_stage.map(|s| s.as_str().to_string()),
            reason: self.reason.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
