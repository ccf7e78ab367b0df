//! Metrics & SLO Evaluator.

pub mod evaluator;
pub mod metrics;

pub use evaluator::{evaluate_slo, SloEvaluator};
pub use metrics::{data_freshness_hours, verification_rate, MetricSet};
