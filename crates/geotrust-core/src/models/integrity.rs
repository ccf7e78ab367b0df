//! Integrity check results.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Pass,
    Fail,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
        }
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail)
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the integrity report, produced anew each run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrityCheckResult {
    pub category: String,
    pub name: String,
    #[serde(rename = "violations")]
    pub violation_count: u64,
    pub status: CheckStatus,
    pub details: String,
    /// Stores implicated by the violations, ascending and de-duplicated.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub store_ids: Vec<i64>,
}

impl IntegrityCheckResult {
    /// Status is derived from the count: FAIL iff `violation_count > 0`.
    pub fn from_count(
        category: impl Into<String>,
        name: impl Into<String>,
        violation_count: u64,
        details: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
            violation_count,
            status: if violation_count > 0 {
                CheckStatus::Fail
            } else {
                CheckStatus::Pass
            },
            details: details.into(),
            store_ids: Vec::new(),
        }
    }

    pub fn with_store_ids(mut self, mut store_ids: Vec<i64>) -> Self {
        store_ids.sort_unstable();
        store_ids.dedup();
        self.store_ids = store_ids;
        self
    }

    /// `category/name`, the identity used for alert deduplication.
    pub fn key(&self) -> String {
        format!("{}/{}", self.category, self.name)
    }
}
