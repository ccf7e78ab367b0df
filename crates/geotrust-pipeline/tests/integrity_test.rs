//! Integrity checks individually and through the checker.

mod common;

use common::{store, store_at, txn, txns};
use geotrust_core::models::{CheckStatus, Geofence, IntegrityCheckResult};
use geotrust_pipeline::classifier::RegistryIndex;
use geotrust_pipeline::integrity::{
    CheckInput, CoreIntegrityCheck, CoverageCheck, GeofenceBoundsCheck, IntegrityCheck,
    IntegrityChecker, UnknownMunicipalityCheck,
};

fn run_all(
    stores: &[geotrust_core::models::StoreRecord],
    transactions: &[geotrust_core::models::TransactionRecord],
) -> geotrust_pipeline::integrity::IntegrityReport {
    let index = RegistryIndex::from_stores(stores);
    let geofence = Geofence::default();
    IntegrityChecker::new().run(&CheckInput {
        stores,
        transactions,
        index: &index,
        geofence: &geofence,
    })
}

#[test]
fn clean_data_passes_every_check() {
    let stores = vec![store(1, "Manila")];
    let report = run_all(&stores, &txns("t", 5, Some(1), "Manila"));
    assert_eq!(report.status, CheckStatus::Pass);
    assert_eq!(report.total_violations, 0);
    assert_eq!(report.results.len(), 4);
    assert!(report.results.iter().all(|r| r.status == CheckStatus::Pass));
}

#[test]
fn scenario_unregistered_store_with_unknown_municipality() {
    let transactions = txns("t", 100, Some(999), "Unknown");
    let report = run_all(&[], &transactions);

    let core = &report.results[0];
    assert_eq!(core.category, "Core Integrity");
    assert_eq!(core.violation_count, 100);
    assert_eq!(core.status, CheckStatus::Fail);

    let coverage = report.by_category("Coverage").unwrap();
    assert_eq!(coverage.violation_count, 1);
    assert_eq!(coverage.store_ids, vec![999]);

    let unknown = report.by_category("Unknown Municipality").unwrap();
    assert_eq!(unknown.violation_count, 100);
    assert_eq!(report.status, CheckStatus::Fail);
}

#[test]
fn null_store_ids_count_as_core_violations_only() {
    let stores = vec![store(1, "Manila")];
    let transactions = vec![
        txn("a", None, "Manila"),
        txn("b", None, "Manila"),
        txn("c", Some(1), "Manila"),
    ];
    let report = run_all(&stores, &transactions);
    assert_eq!(report.by_category("Core Integrity").unwrap().violation_count, 2);
    assert_eq!(report.by_category("Coverage").unwrap().violation_count, 0);
}

#[test]
fn coverage_counts_distinct_store_ids() {
    let mut transactions = txns("a", 3, Some(50), "Manila");
    transactions.extend(txns("b", 2, Some(60), "Pasig"));
    transactions.extend(txns("c", 4, Some(1), "Manila"));
    let report = run_all(&[store(1, "Manila")], &transactions);

    let coverage = report.by_category("Coverage").unwrap();
    assert_eq!(coverage.violation_count, 2);
    assert_eq!(coverage.store_ids, vec![50, 60]);
    assert_eq!(report.by_category("Core Integrity").unwrap().violation_count, 5);
}

#[test]
fn geofence_check_flags_out_of_bounds_stores() {
    let stores = vec![
        store_at(1, "Manila", 14.5, 121.0),
        store_at(2, "Cebu", 10.3, 123.9),
        store_at(3, "Edge", 14.9, 121.2),
    ];
    let index = RegistryIndex::from_stores(&stores);
    let geofence = Geofence::default();
    let result = GeofenceBoundsCheck.run(&CheckInput {
        stores: &stores,
        transactions: &[],
        index: &index,
        geofence: &geofence,
    });
    assert_eq!(result.violation_count, 1);
    assert_eq!(result.store_ids, vec![2]);
}

#[test]
fn checks_are_independent_of_each_other() {
    let stores = vec![store(1, "Manila")];
    let transactions = vec![txn("a", Some(1), "Unknown")];
    let index = RegistryIndex::from_stores(&stores);
    let geofence = Geofence::default();
    let input = CheckInput {
        stores: &stores,
        transactions: &transactions,
        index: &index,
        geofence: &geofence,
    };

    assert_eq!(CoreIntegrityCheck.run(&input).violation_count, 0);
    assert_eq!(CoverageCheck.run(&input).violation_count, 0);
    let unknown = UnknownMunicipalityCheck.run(&input);
    assert_eq!(unknown.violation_count, 1);
    assert_eq!(unknown.store_ids, vec![1]);
}

struct PanickingCheck;

impl IntegrityCheck for PanickingCheck {
    fn category(&self) -> &'static str {
        "Broken"
    }
    fn name(&self) -> &'static str {
        "always_panics"
    }
    fn run(&self, _input: &CheckInput<'_>) -> IntegrityCheckResult {
        panic!("boom");
    }
}

#[test]
fn panicking_check_is_reported_without_hiding_others() {
    let checker = IntegrityChecker::with_checks(vec![
        Box::new(PanickingCheck),
        Box::new(CoreIntegrityCheck),
    ]);
    assert_eq!(checker.check_count(), 2);

    let stores = vec![store(1, "Manila")];
    let transactions = txns("t", 2, Some(1), "Manila");
    let index = RegistryIndex::from_stores(&stores);
    let geofence = Geofence::default();
    let report = checker.run(&CheckInput {
        stores: &stores,
        transactions: &transactions,
        index: &index,
        geofence: &geofence,
    });

    assert_eq!(report.results.len(), 2);
    assert_eq!(report.results[0].category, "Broken");
    assert_eq!(report.results[0].status, CheckStatus::Fail);
    assert!(report.results[0].details.contains("boom"));
    assert_eq!(report.results[1].status, CheckStatus::Pass);
    assert_eq!(report.status, CheckStatus::Fail);
}

#[test]
fn results_follow_registration_order() {
    let mut checker = IntegrityChecker::with_checks(Vec::new());
    checker.register(Box::new(UnknownMunicipalityCheck));
    checker.register(Box::new(CoverageCheck));
    let report = run_with(&checker);
    let categories: Vec<&str> = report.results.iter().map(|r| r.category.as_str()).collect();
    assert_eq!(categories, vec!["Unknown Municipality", "Coverage"]);
}

fn run_with(checker: &IntegrityChecker) -> geotrust_pipeline::integrity::IntegrityReport {
    let index = RegistryIndex::default();
    let geofence = Geofence::default();
    checker.run(&CheckInput {
        stores: &[],
        transactions: &[],
        index: &index,
        geofence: &geofence,
    })
}
