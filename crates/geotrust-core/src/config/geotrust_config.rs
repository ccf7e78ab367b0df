//! Top-level GeoTrust configuration with layered resolution.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{GeofenceConfig, RunLockConfig, SloConfig, StaleLockPolicy, StorageConfig, TicketConfig};
use crate::constants;
use crate::errors::ConfigError;

/// Default config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "geotrust.toml";

/// Top-level configuration aggregating all sub-configs. Passed explicitly
/// into the orchestrator; there is no process-wide instance.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`GEOTRUST_*`)
/// 2. Config file (explicit path, or `geotrust.toml` in the working directory)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GeotrustConfig {
    pub storage: StorageConfig,
    pub geofence: GeofenceConfig,
    pub slo: SloConfig,
    pub run_lock: RunLockConfig,
    pub tickets: TicketConfig,
}

impl GeotrustConfig {
    /// Load configuration with layered resolution.
    ///
    /// An explicit `path` must exist. Without one, `geotrust.toml` in the
    /// working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default_path = Path::new(CONFIG_FILE_NAME);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        Self::apply_env_overrides(&mut config)?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Read and parse a TOML config file without env overrides.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &GeotrustConfig) -> Result<(), ConfigError> {
        let fence = config.geofence.effective_geofence();
        let coords = [
            ("geofence.min_latitude", fence.min_latitude, 90.0),
            ("geofence.max_latitude", fence.max_latitude, 90.0),
            ("geofence.min_longitude", fence.min_longitude, 180.0),
            ("geofence.max_longitude", fence.max_longitude, 180.0),
        ];
        for (field, value, limit) in coords {
            if !value.is_finite() || value.abs() > limit {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: format!("must be a finite value within ±{limit}"),
                });
            }
        }
        if fence.min_latitude > fence.max_latitude {
            return Err(ConfigError::ValidationFailed {
                field: "geofence.min_latitude".to_string(),
                message: "must not exceed geofence.max_latitude".to_string(),
            });
        }
        if fence.min_longitude > fence.max_longitude {
            return Err(ConfigError::ValidationFailed {
                field: "geofence.min_longitude".to_string(),
                message: "must not exceed geofence.max_longitude".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for slo in &config.slo.targets {
            if !seen.insert(slo.name.as_str()) {
                return Err(ConfigError::ValidationFailed {
                    field: format!("slo.targets.{}", slo.name),
                    message: "duplicate SLO name".to_string(),
                });
            }
            if !constants::KNOWN_METRICS.contains(&slo.metric_name()) {
                return Err(ConfigError::ValidationFailed {
                    field: format!("slo.targets.{}", slo.name),
                    message: format!("unknown metric '{}'", slo.metric_name()),
                });
            }
            if !slo.target.is_finite() {
                return Err(ConfigError::ValidationFailed {
                    field: format!("slo.targets.{}", slo.name),
                    message: "target must be finite".to_string(),
                });
            }
        }

        if config.storage.query_timeout_ms == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "storage.query_timeout_ms".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.storage.busy_timeout_ms == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "storage.busy_timeout_ms".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.run_lock.stale_after_secs == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "run_lock.stale_after_secs".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(size) = config.tickets.sample_size {
            if !(1..=constants::MAX_TICKET_SAMPLE_SIZE).contains(&size) {
                return Err(ConfigError::ValidationFailed {
                    field: "tickets.sample_size".to_string(),
                    message: format!(
                        "must be between 1 and {}",
                        constants::MAX_TICKET_SAMPLE_SIZE
                    ),
                });
            }
        }
        Ok(())
    }

    /// Apply environment variable overrides.
    /// Pattern: `GEOTRUST_DB_PATH`, `GEOTRUST_QUERY_TIMEOUT_MS`, etc.
    /// Unparseable numeric values are rejected rather than ignored.
    fn apply_env_overrides(config: &mut GeotrustConfig) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("GEOTRUST_DB_PATH") {
            config.storage.path = Some(val);
        }
        if let Some(v) = env_parse::<u64>("GEOTRUST_QUERY_TIMEOUT_MS")? {
            config.storage.query_timeout_ms = Some(v);
        }
        if let Some(v) = env_parse::<u64>("GEOTRUST_BUSY_TIMEOUT_MS")? {
            config.storage.busy_timeout_ms = Some(v);
        }
        if let Some(v) = env_parse::<u64>("GEOTRUST_STALE_LOCK_SECS")? {
            config.run_lock.stale_after_secs = Some(v);
        }
        if let Ok(val) = std::env::var("GEOTRUST_ON_STALE") {
            config.run_lock.on_stale = Some(match val.as_str() {
                "force_clear" => StaleLockPolicy::ForceClear,
                "refuse" => StaleLockPolicy::Refuse,
                other => {
                    return Err(ConfigError::ValidationFailed {
                        field: "GEOTRUST_ON_STALE".to_string(),
                        message: format!("expected 'force_clear' or 'refuse', got '{other}'"),
                    })
                }
            });
        }
        if let Some(v) = env_parse::<usize>("GEOTRUST_TICKET_SAMPLE_SIZE")? {
            config.tickets.sample_size = Some(v);
        }
        Ok(())
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(val) => val.trim().parse::<T>().map(Some).map_err(|_| {
            ConfigError::ValidationFailed {
                field: key.to_string(),
                message: format!("cannot parse '{val}'"),
            }
        }),
        Err(_) => Ok(None),
    }
}
