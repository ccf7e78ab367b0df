//! Per-transaction verification judgment. Derived, never persisted.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationJudgment {
    pub transaction_id: String,
    pub is_verified: bool,
}

/// Counts over a judgment set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub total: u64,
    pub verified: u64,
    pub unverified: u64,
}

impl VerificationSummary {
    pub fn from_judgments(judgments: &[VerificationJudgment]) -> Self {
        let verified = judgments.iter().filter(|j| j.is_verified).count() as u64;
        let total = judgments.len() as u64;
        Self {
            total,
            verified,
            unverified: total - verified,
        }
    }
}
