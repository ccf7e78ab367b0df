//! Error handling for GeoTrust.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod pipeline_error;
pub mod registry_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use error_code::GeotrustErrorCode;
pub use pipeline_error::PipelineError;
pub use registry_error::RegistryError;
pub use storage_error::StorageError;
