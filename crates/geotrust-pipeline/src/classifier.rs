//! Location Classifier.
//!
//! A transaction is verified iff its `store_id` is in the registry and its
//! claimed municipality is not the `"Unknown"` sentinel. Judgments are never
//! persisted; they are recomputed from scratch on every call.

use std::collections::HashSet;

use geotrust_core::constants::UNKNOWN_MUNICIPALITY;
use geotrust_core::models::{StoreRecord, TransactionRecord, VerificationJudgment};

/// Registry membership snapshot used for classification.
#[derive(Debug, Clone, Default)]
pub struct RegistryIndex {
    store_ids: HashSet<i64>,
}

impl RegistryIndex {
    pub fn from_stores(stores: &[StoreRecord]) -> Self {
        Self::from_ids(stores.iter().map(|s| s.store_id))
    }

    pub fn from_ids(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            store_ids: ids.into_iter().collect(),
        }
    }

    pub fn contains(&self, store_id: i64) -> bool {
        self.store_ids.contains(&store_id)
    }

    pub fn len(&self) -> usize {
        self.store_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store_ids.is_empty()
    }
}

pub fn is_unknown_municipality(claimed: &str) -> bool {
    claimed == UNKNOWN_MUNICIPALITY
}

pub fn is_verified(transaction: &TransactionRecord, index: &RegistryIndex) -> bool {
    match transaction.store_id {
        Some(id) => index.contains(id) && !is_unknown_municipality(&transaction.claimed_municipality),
        None => false,
    }
}

/// One judgment per transaction, in input order.
pub fn classify(transactions: &[TransactionRecord], index: &RegistryIndex) -> Vec<VerificationJudgment> {
    transactions
        .iter()
        .map(|t| VerificationJudgment {
            transaction_id: t.transaction_id.clone(),
            is_verified: is_verified(t, index),
        })
        .collect()
}
