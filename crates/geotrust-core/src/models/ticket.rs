//! Remediation tickets for unverified stores.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Open,
    Resolved,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Resolved => "resolved",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "resolved" => Ok(Self::Resolved),
            other => Err(format!("unknown ticket status '{other}'")),
        }
    }
}

/// Why a store needs remediation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketReason {
    /// Transactions reference a store id missing from the registry.
    UnregisteredStore,
    /// The store is registered but transactions claim the "Unknown" municipality.
    UnknownMunicipality,
}

impl TicketReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnregisteredStore => "unregistered_store",
            Self::UnknownMunicipality => "unknown_municipality",
        }
    }
}

impl fmt::Display for TicketReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unregistered_store" => Ok(Self::UnregisteredStore),
            "unknown_municipality" => Ok(Self::UnknownMunicipality),
            other => Err(format!("unknown ticket reason '{other}'")),
        }
    }
}

/// At most one ticket exists per `(store_id, day)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub store_id: i64,
    pub day: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub reason: TicketReason,
    pub transaction_count: u64,
    pub sample_transaction_ids: Vec<String>,
    pub municipality: String,
    pub status: TicketStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    /// Rendered remediation document.
    pub document: String,
}
