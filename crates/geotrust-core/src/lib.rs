//! # geotrust-core
//!
//! Foundation crate for the GeoTrust zero-trust location verification pipeline.
//! Defines the data model, repository traits, errors, config, events, tracing
//! setup, and constants. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod models;
pub mod traits;
pub mod tracing;

pub use config::GeotrustConfig;
pub use errors::{ConfigError, PipelineError, RegistryError, StorageError};
