pub mod billing;
pub mod entries;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod projects;
pub mod stats;

use crate::errors::AppError;
use crate::utils::{date::parse_date, time::parse_stored_ts};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Row;
use rusqlite::types::Type;

fn conversion_error(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(err))
}

pub(crate) fn get_ts(row: &Row, col: &str) -> rusqlite::Result<NaiveDateTime> {
    let raw: String = row.get(col)?;
    parse_stored_ts(&raw).ok_or_else(|| conversion_error(AppError::InvalidTime(raw)))
}

pub(crate) fn get_opt_ts(row: &Row, col: &str) -> rusqlite::Result<Option<NaiveDateTime>> {
    let raw: Option<String> = row.get(col)?;
    raw.map(|s| parse_stored_ts(&s).ok_or_else(|| conversion_error(AppError::InvalidTime(s))))
        .transpose()
}

pub(crate) fn get_date(row: &Row, col: &str) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(col)?;
    parse_date(&raw).ok_or_else(|| conversion_error(AppError::InvalidDate(raw)))
}

pub(crate) fn invalid_column(col: &str, value: String) -> rusqlite::Error {
    conversion_error(AppError::Other(format!("invalid value for {col}: {value}")))
}
