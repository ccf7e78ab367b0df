//! Unknown Municipality: transactions claiming the `"Unknown"` sentinel.

use geotrust_core::constants::CATEGORY_UNKNOWN_MUNICIPALITY;
use geotrust_core::models::IntegrityCheckResult;

use super::types::{CheckInput, IntegrityCheck};
use crate::classifier::is_unknown_municipality;

pub struct UnknownMunicipalityCheck;

impl IntegrityCheck for UnknownMunicipalityCheck {
    fn category(&self) -> &'static str {
        CATEGORY_UNKNOWN_MUNICIPALITY
    }

    fn name(&self) -> &'static str {
        "unknown_municipality_transactions"
    }

    fn run(&self, input: &CheckInput<'_>) -> IntegrityCheckResult {
        let flagged: Vec<_> = input
            .transactions
            .iter()
            .filter(|t| is_unknown_municipality(&t.claimed_municipality))
            .collect();
        let store_ids: Vec<i64> = flagged.iter().filter_map(|t| t.store_id).collect();

        let details = format!(
            "{} of {} transactions claim an unknown municipality",
            flagged.len(),
            input.transactions.len()
        );
        IntegrityCheckResult::from_count(self.category(), self.name(), flagged.len() as u64, details)
            .with_store_ids(store_ids)
    }
}
