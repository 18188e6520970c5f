//! Timestamp utilities: parsing CLI instants, storage formatting, durations.

use crate::errors::{AppError, AppResult};
use crate::utils::date::today;
use chrono::{Local, NaiveDateTime, NaiveTime, Timelike};

/// Storage format for instants (local time, second precision).
pub const TS_FMT: &str = "%Y-%m-%d %H:%M:%S";

const ACCEPTED_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Current local time truncated to whole seconds.
pub fn now() -> NaiveDateTime {
    let t = Local::now().naive_local();
    t.with_nanosecond(0).unwrap_or(t)
}

/// Parse a full timestamp, or a bare `HH:MM` meaning today.
pub fn parse_timestamp(s: &str) -> AppResult<NaiveDateTime> {
    let s = s.trim();
    for fmt in ACCEPTED_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(ts);
        }
    }
    NaiveTime::parse_from_str(s, "%H:%M")
        .map(|t| today().and_time(t))
        .map_err(|_| AppError::InvalidTime(s.to_string()))
}

/// `--at` handling: explicit instant if given, wall clock otherwise.
pub fn resolve_now(at: Option<&String>) -> AppResult<NaiveDateTime> {
    match at {
        Some(s) => parse_timestamp(s),
        None => Ok(now()),
    }
}

pub fn parse_optional_timestamp(input: Option<&String>) -> AppResult<Option<NaiveDateTime>> {
    input.map(|s| parse_timestamp(s)).transpose()
}

pub fn format_ts(ts: &NaiveDateTime) -> String {
    ts.format(TS_FMT).to_string()
}

pub fn parse_stored_ts(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TS_FMT).ok()
}

pub fn seconds_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    (end - start).num_seconds()
}
