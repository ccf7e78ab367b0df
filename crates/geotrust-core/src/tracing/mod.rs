//! Observability for GeoTrust.
//! `tracing` crate with `EnvFilter`, per-component log levels.

pub mod fields;
pub mod setup;

pub use setup::init_tracing;
