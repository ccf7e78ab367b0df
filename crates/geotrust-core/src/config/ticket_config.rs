//! Ticket generator configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TicketConfig {
    /// Sample transaction ids per ticket. Default: 3.
    pub sample_size: Option<usize>,
    /// Resolve open tickets whose store has been fixed. Default: true.
    pub auto_resolve: Option<bool>,
}

impl TicketConfig {
    pub fn effective_sample_size(&self) -> usize {
        self.sample_size
            .unwrap_or(constants::DEFAULT_TICKET_SAMPLE_SIZE)
    }

    pub fn effective_auto_resolve(&self) -> bool {
        self.auto_resolve.unwrap_or(true)
    }
}
