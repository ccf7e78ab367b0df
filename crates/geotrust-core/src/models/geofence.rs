//! Rectangular latitude/longitude bounds for store coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Inclusive bounding box every registered store must fall within.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geofence {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl Geofence {
    pub fn new(min_latitude: f64, max_latitude: f64, min_longitude: f64, max_longitude: f64) -> Self {
        Self {
            min_latitude,
            max_latitude,
            min_longitude,
            max_longitude,
        }
    }

    /// Both bounds are inclusive. NaN coordinates are never contained.
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&latitude)
            && (self.min_longitude..=self.max_longitude).contains(&longitude)
    }
}

impl Default for Geofence {
    fn default() -> Self {
        Self {
            min_latitude: constants::DEFAULT_MIN_LATITUDE,
            max_latitude: constants::DEFAULT_MAX_LATITUDE,
            min_longitude: constants::DEFAULT_MIN_LONGITUDE,
            max_longitude: constants::DEFAULT_MAX_LONGITUDE,
        }
    }
}

impl fmt::Display for Geofence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lat [{}, {}], lon [{}, {}]",
            self.min_latitude, self.max_latitude, self.min_longitude, self.max_longitude
        )
    }
}
