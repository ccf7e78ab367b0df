//! Ingested transaction with its claimed location.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A transaction as delivered by upstream ingestion. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub transaction_id: String,
    /// `None` when the payload carried no store reference.
    pub store_id: Option<i64>,
    pub claimed_municipality: String,
    /// Payload-carried flag. Recorded, never trusted for verification.
    pub claimed_verified_flag: bool,
    pub basket_item_count: u32,
    pub timestamp: DateTime<Utc>,
}
