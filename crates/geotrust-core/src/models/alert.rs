//! Deduplicated alert records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Severity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub category: String,
    pub name: String,
    pub message: String,
    pub severity: Severity,
    pub day: NaiveDate,
    pub created_at: DateTime<Utc>,
    /// Hash of `category/name` and `day`. Unique in storage.
    pub dedup_key: String,
}
