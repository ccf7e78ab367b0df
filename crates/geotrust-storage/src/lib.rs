//! # geotrust-storage
//!
//! SQLite persistence for the verification pipeline. A single serialized
//! writer plus a read pool, `PRAGMA user_version` migrations, one query module
//! per table, and [`StorageEngine`] implementing every repository trait from
//! `geotrust_core::traits`.

pub mod connection;
pub mod engine;
pub mod migrations;
pub mod queries;

pub use connection::DatabaseManager;
pub use engine::StorageEngine;
