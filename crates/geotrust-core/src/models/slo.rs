//! SLO definitions and evaluations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{CheckStatus, Severity};
use crate::constants::SLO_EQUALITY_EPSILON;

/// Comparison applied as `current <op> target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SloOperator {
    #[serde(rename = ">=")]
    GreaterEqual,
    #[serde(rename = "<=")]
    LessEqual,
    #[serde(rename = "==")]
    Equal,
}

impl SloOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GreaterEqual => ">=",
            Self::LessEqual => "<=",
            Self::Equal => "==",
        }
    }

    /// Returns true when `current <op> target` holds. NaN never holds.
    pub fn holds(&self, current: f64, target: f64) -> bool {
        match self {
            Self::GreaterEqual => current >= target,
            Self::LessEqual => current <= target,
            Self::Equal => (current - target).abs() <= SLO_EQUALITY_EPSILON,
        }
    }
}

impl fmt::Display for SloOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SloOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            ">=" => Ok(Self::GreaterEqual),
            "<=" => Ok(Self::LessEqual),
            "==" => Ok(Self::Equal),
            other => Err(format!("unsupported SLO operator '{other}'")),
        }
    }
}

/// A configured service-level objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SloDefinition {
    pub name: String,
    /// Metric to compare. Defaults to `name` when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
    pub target: f64,
    pub operator: SloOperator,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SloDefinition {
    pub fn new(
        name: impl Into<String>,
        operator: SloOperator,
        target: f64,
        severity: Severity,
    ) -> Self {
        Self {
            name: name.into(),
            metric: None,
            target,
            operator,
            severity,
            description: None,
        }
    }

    pub fn metric_name(&self) -> &str {
        self.metric.as_deref().unwrap_or(&self.name)
    }
}

/// Instantaneous result of one SLO against the current run's metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SloEvaluation {
    pub slo_name: String,
    pub current_value: f64,
    pub target_value: f64,
    pub operator: SloOperator,
    pub status: CheckStatus,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl SloEvaluation {
    pub fn is_breach(&self) -> bool {
        self.status.is_fail()
    }
}
