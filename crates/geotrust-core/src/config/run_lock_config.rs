//! Run-lock configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants;

/// What to do with an in-progress marker older than the stale threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleLockPolicy {
    /// Clear the abandoned marker and start.
    ForceClear,
    /// Refuse to start until an operator clears it.
    Refuse,
}

impl fmt::Display for StaleLockPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ForceClear => "force_clear",
            Self::Refuse => "refuse",
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RunLockConfig {
    /// Age in seconds after which a marker is stale. Default: 600.
    pub stale_after_secs: Option<u64>,
    /// Default: `force_clear`.
    pub on_stale: Option<StaleLockPolicy>,
}

impl RunLockConfig {
    pub fn effective_stale_after_secs(&self) -> u64 {
        self.stale_after_secs
            .unwrap_or(constants::DEFAULT_STALE_LOCK_SECS)
    }

    pub fn effective_on_stale(&self) -> StaleLockPolicy {
        self.on_stale.unwrap_or(StaleLockPolicy::ForceClear)
    }
}
