//! Run status, in-progress marker, and run history.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{StoreRecord, TransactionRecord};

/// Overall run status. Ordered so the worst status is the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RunStatus {
    #[default]
    Success,
    Warning,
    Error,
    Aborted,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Aborted => "ABORTED",
        }
    }

    /// Process exit code: SUCCESS=0, WARNING=1, ERROR=2, ABORTED=3.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Warning => 1,
            Self::Error => 2,
            Self::Aborted => 3,
        }
    }

    /// The worse of the two statuses.
    pub fn worst(self, other: Self) -> Self {
        self.max(other)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUCCESS" => Ok(Self::Success),
            "WARNING" => Ok(Self::Warning),
            "ERROR" => Ok(Self::Error),
            "ABORTED" => Ok(Self::Aborted),
            other => Err(format!("unknown run status '{other}'")),
        }
    }
}

/// The in-progress marker held for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunLock {
    pub holder: String,
    pub acquired_at: DateTime<Utc>,
}

impl RunLock {
    pub fn age_secs(&self, now: DateTime<Utc>) -> i64 {
        (now - self.acquired_at).num_seconds()
    }
}

/// Append-only record of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunHistoryRecord {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub status: RunStatus,
    pub final_state: String,
    pub worst_stage: Option<String>,
    pub reason: Option<String>,
}

/// The registry and transaction set one run evaluates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunInput {
    pub stores: Vec<StoreRecord>,
    pub transactions: Vec<TransactionRecord>,
}
