//! Core Integrity: transactions whose store is not in the registry.

use geotrust_core::constants::CATEGORY_CORE_INTEGRITY;
use geotrust_core::models::IntegrityCheckResult;

use super::types::{CheckInput, IntegrityCheck};

/// Counts transactions with a null or unregistered `store_id`.
pub struct CoreIntegrityCheck;

impl IntegrityCheck for CoreIntegrityCheck {
    fn category(&self) -> &'static str {
        CATEGORY_CORE_INTEGRITY
    }

    fn name(&self) -> &'static str {
        "unregistered_store_transactions"
    }

    fn run(&self, input: &CheckInput<'_>) -> IntegrityCheckResult {
        let mut null_ids = 0u64;
        let mut unregistered = 0u64;
        let mut store_ids = Vec::new();

        for txn in input.transactions {
            match txn.store_id {
                None => null_ids += 1,
                Some(id) if !input.index.contains(id) => {
                    unregistered += 1;
                    store_ids.push(id);
                }
                Some(_) => {}
            }
        }

        let violations = null_ids + unregistered;
        let details = format!(
            "{violations} of {} transactions reference no registered store ({null_ids} without a store id)",
            input.transactions.len()
        );
        IntegrityCheckResult::from_count(self.category(), self.name(), violations, details)
            .with_store_ids(store_ids)
    }
}
