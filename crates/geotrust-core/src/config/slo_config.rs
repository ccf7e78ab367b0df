//! SLO configuration.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::models::{Severity, SloDefinition, SloOperator};

/// Configured SLO targets. An empty list means the compiled defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SloConfig {
    pub targets: Vec<SloDefinition>,
}

impl SloConfig {
    /// Returns the effective SLO list, defaulting to [`default_slos`].
    pub fn effective_targets(&self) -> Vec<SloDefinition> {
        if self.targets.is_empty() {
            default_slos()
        } else {
            self.targets.clone()
        }
    }
}

/// Compiled default SLOs, in report order.
pub fn default_slos() -> Vec<SloDefinition> {
    vec![
        SloDefinition::new(
            constants::METRIC_VERIFICATION_RATE,
            SloOperator::GreaterEqual,
            95.0,
            Severity::Critical,
        ),
        SloDefinition::new(
            constants::METRIC_CORE_INTEGRITY_VIOLATIONS,
            SloOperator::Equal,
            0.0,
            Severity::High,
        ),
        SloDefinition::new(
            constants::METRIC_GEOFENCE_VIOLATIONS,
            SloOperator::Equal,
            0.0,
            Severity::High,
        ),
        SloDefinition::new(
            constants::METRIC_COVERAGE_GAP_STORES,
            SloOperator::LessEqual,
            0.0,
            Severity::Medium,
        ),
        SloDefinition::new(
            constants::METRIC_DATA_FRESHNESS_HOURS,
            SloOperator::LessEqual,
            48.0,
            Severity::Low,
        ),
    ]
}
