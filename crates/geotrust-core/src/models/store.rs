//! Authoritative store registry record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A known, verified store. Written only through the registry's
/// add/update operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreRecord {
    pub store_id: i64,
    pub store_name: String,
    pub municipality: String,
    pub barangay: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
