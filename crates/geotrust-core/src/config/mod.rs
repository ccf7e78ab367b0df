//! Configuration system for GeoTrust.
//! TOML-based, 3-layer resolution: env > config file > defaults.

pub mod geofence_config;
pub mod geotrust_config;
pub mod run_lock_config;
pub mod slo_config;
pub mod storage_config;
pub mod ticket_config;

pub use geofence_config::GeofenceConfig;
pub use geotrust_config::GeotrustConfig;
pub use run_lock_config::{RunLockConfig, StaleLockPolicy};
pub use slo_config::SloConfig;
pub use storage_config::StorageConfig;
pub use ticket_config::TicketConfig;
