//! Integrity Checker: an extensible set of named, side-effect-free checks.

pub mod checker;
pub mod core_integrity;
pub mod coverage;
pub mod geofence_bounds;
pub mod types;
pub mod unknown_municipality;

pub use checker::IntegrityChecker;
pub use core_integrity::CoreIntegrityCheck;
pub use coverage::CoverageCheck;
pub use geofence_bounds::GeofenceBoundsCheck;
pub use types::{CheckInput, IntegrityCheck, IntegrityReport};
pub use unknown_municipality::UnknownMunicipalityCheck;
