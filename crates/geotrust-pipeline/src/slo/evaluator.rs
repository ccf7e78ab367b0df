//! SLO evaluation: `operator(current, target)` per definition. No retries,
//! no smoothing, no memory of previous runs.

use geotrust_core::models::{CheckStatus, SloDefinition, SloEvaluation};

use super::metrics::MetricSet;

pub struct SloEvaluator {
    definitions: Vec<SloDefinition>,
}

impl SloEvaluator {
    pub fn new(definitions: Vec<SloDefinition>) -> Self {
        Self { definitions }
    }

    pub fn definitions(&self) -> &[SloDefinition] {
        &self.definitions
    }

    /// One evaluation per definition, in definition order.
    pub fn evaluate(&self, metrics: &MetricSet) -> Vec<SloEvaluation> {
        self.definitions
            .iter()
            .map(|def| evaluate_slo(def, metrics))
            .collect()
    }
}

/// Evaluate one SLO. A metric that was not computed evaluates to FAIL.
pub fn evaluate_slo(definition: &SloDefinition, metrics: &MetricSet) -> SloEvaluation {
    let metric = definition.metric_name();
    match metrics.get(metric) {
        Some(current) => {
            let passed = definition.operator.holds(current, definition.target);
            SloEvaluation {
                slo_name: definition.name.clone(),
                current_value: current,
                target_value: definition.target,
                operator: definition.operator,
                status: if passed { CheckStatus::Pass } else { CheckStatus::Fail },
                severity: definition.severity,
                details: (!passed).then(|| {
                    format!(
                        "{metric} = {current} does not satisfy {} {}",
                        definition.operator, definition.target
                    )
                }),
            }
        }
        None => {
            tracing::warn!(slo = %definition.name, metric, "SLO references a metric that was not computed");
            SloEvaluation {
                slo_name: definition.name.clone(),
                current_value: f64::NAN,
                target_value: definition.target,
                operator: definition.operator,
                status: CheckStatus::Fail,
                severity: definition.severity,
                details: Some(format!("metric '{metric}' is not available")),
            }
        }
    }
}
