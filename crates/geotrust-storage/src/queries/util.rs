//! Shared conversions between model types and SQLite column values.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use geotrust_core::errors::StorageError;
use rusqlite::types::Type;
use rusqlite::ErrorCode;

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Map a rusqlite error, keeping busy and interrupt conditions distinguishable.
pub fn sqlite_err(e: rusqlite::Error) -> StorageError {
    match e.sqlite_error_code() {
        Some(ErrorCode::OperationInterrupted) => StorageError::Interrupted,
        Some(ErrorCode::DatabaseBusy) | Some(ErrorCode::DatabaseLocked) => StorageError::Busy {
            message: e.to_string(),
        },
        _ => StorageError::SqliteError {
            message: e.to_string(),
        },
    }
}

pub fn to_epoch(dt: &DateTime<Utc>) -> i64 {
    dt.timestamp()
}

pub fn from_epoch(idx: usize, secs: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .ok_or_else(|| conversion_error(idx, Type::Integer, format!("timestamp {secs} out of range")))
}

pub fn day_to_text(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

pub fn day_from_text(idx: usize, text: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(text, DAY_FORMAT)
        .map_err(|e| conversion_error(idx, Type::Text, format!("invalid day '{text}': {e}")))
}

/// Parse a TEXT column into an enum with a string `FromStr`.
pub fn parse_text<T>(idx: usize, text: &str) -> rusqlite::Result<T>
where
    T: FromStr<Err = String>,
{
    text.parse::<T>()
        .map_err(|message| conversion_error(idx, Type::Text, message))
}

/// Non-negative INTEGER column into a count.
pub fn to_count(idx: usize, value: i64) -> rusqlite::Result<u64> {
    u64::try_from(value)
        .map_err(|_| conversion_error(idx, Type::Integer, format!("negative count {value}")))
}

/// Non-negative INTEGER column that must fit in a `u32`.
pub fn to_u32(idx: usize, value: i64) -> rusqlite::Result<u32> {
    u32::try_from(value)
        .map_err(|_| conversion_error(idx, Type::Integer, format!("value {value} out of range for u32")))
}

fn conversion_error(idx: usize, ty: Type, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, ty, message.into())
}
