//! Coverage: distinct store ids seen in transactions but absent from the registry.

use std::collections::BTreeSet;

use geotrust_core::constants::CATEGORY_COVERAGE;
use geotrust_core::models::IntegrityCheckResult;

use super::types::{CheckInput, IntegrityCheck};

pub struct CoverageCheck;

impl IntegrityCheck for CoverageCheck {
    fn category(&self) -> &'static str {
        CATEGORY_COVERAGE
    }

    fn name(&self) -> &'static str {
        "unregistered_store_ids"
    }

    fn run(&self, input: &CheckInput<'_>) -> IntegrityCheckResult {
        // Null ids identify no store, so they are not a coverage gap.
        let missing: BTreeSet<i64> = input
            .transactions
            .iter()
            .filter_map(|t| t.store_id)
            .filter(|id| !input.index.contains(*id))
            .collect();

        let details = if missing.is_empty() {
            "every referenced store is registered".to_string()
        } else {
            let preview: Vec<String> = missing.iter().take(10).map(i64::to_string).collect();
            format!(
                "{} store ids missing from the registry: {}{}",
                missing.len(),
                preview.join(", "),
                if missing.len() > 10 { ", ..." } else { "" }
            )
        };
        IntegrityCheckResult::from_count(self.category(), self.name(), missing.len() as u64, details)
            .with_store_ids(missing.into_iter().collect())
    }
}
