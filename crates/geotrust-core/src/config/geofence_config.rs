//! Geofence configuration.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::models::Geofence;

/// Store coordinate bounds. Defaults cover Metro Manila.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GeofenceConfig {
    pub min_latitude: Option<f64>,
    pub max_latitude: Option<f64>,
    pub min_longitude: Option<f64>,
    pub max_longitude: Option<f64>,
}

impl GeofenceConfig {
    /// Returns the effective geofence, filling unset bounds with defaults.
    pub fn effective_geofence(&self) -> Geofence {
        Geofence::new(
            self.min_latitude.unwrap_or(constants::DEFAULT_MIN_LATITUDE),
            self.max_latitude.unwrap_or(constants::DEFAULT_MAX_LATITUDE),
            self.min_longitude.unwrap_or(constants::DEFAULT_MIN_LONGITUDE),
            self.max_longitude.unwrap_or(constants::DEFAULT_MAX_LONGITUDE),
        )
    }
}
