//! Geofence Bounds: registered stores whose coordinates fall outside the fence.
//!
//! The registry rejects such writes, so this only fires when the fence was
//! narrowed after stores were registered or rows were written out of band.

use geotrust_core::constants::CATEGORY_GEOFENCE_BOUNDS;
use geotrust_core::models::IntegrityCheckResult;

use super::types::{CheckInput, IntegrityCheck};

pub struct GeofenceBoundsCheck;

impl IntegrityCheck for GeofenceBoundsCheck {
    fn category(&self) -> &'static str {
        CATEGORY_GEOFENCE_BOUNDS
    }

    fn name(&self) -> &'static str {
        "store_coordinates_out_of_bounds"
    }

    fn run(&self, input: &CheckInput<'_>) -> IntegrityCheckResult {
        let outside: Vec<i64> = input
            .stores
            .iter()
            .filter(|s| !input.geofence.contains(s.latitude, s.longitude))
            .map(|s| s.store_id)
            .collect();

        let details = format!(
            "{} of {} registered stores outside {}",
            outside.len(),
            input.stores.len(),
            input.geofence
        );
        IntegrityCheckResult::from_count(self.category(), self.name(), outside.len() as u64, details)
            .with_store_ids(outside)
    }
}
