// src/export/range.rs

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

/// Parse a date range expression into inclusive bounds.
///
/// Accepted forms:
/// - `YYYY`, `YYYY-MM`, `YYYY-MM-DD`
/// - the same forms as `start:end` (both sides in the same form)
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let (start, end) = match r.split_once(':') {
        Some((s, e)) => {
            let (s, e) = (s.trim(), e.trim());
            if s.len() != e.len() {
                return Err(invalid(r, "start and end must have the same format"));
            }
            (parse_bound(s, false)?, parse_bound(e, true)?)
        }
        None => {
            let r = r.trim();
            (parse_bound(r, false)?, parse_bound(r, true)?)
        }
    };

    if start > end {
        return Err(invalid(r, "start is after end"));
    }
    Ok((start, end))
}

/// First (or, with `end`, last) day of the year/month/day written in `s`.
fn parse_bound(s: &str, end: bool) -> AppResult<NaiveDate> {
    match s.len() {
        4 => {
            let y: i32 = s.parse().map_err(|_| invalid(s, "invalid year"))?;
            let (m, d) = if end { (12, 31) } else { (1, 1) };
            NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| invalid(s, "invalid year"))
        }
        7 => {
            let first = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
                .map_err(|_| invalid(s, "invalid month"))?;
            if end {
                last_day_of_month(first).ok_or_else(|| invalid(s, "invalid month"))
            } else {
                Ok(first)
            }
        }
        10 => NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| invalid(s, "invalid date")),
        _ => Err(invalid(s, "unsupported range format")),
    }
}

fn last_day_of_month(first: NaiveDate) -> Option<NaiveDate> {
    let (y, m) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)?.pred_opt()
}

fn invalid(input: &str, reason: &str) -> AppError {
    AppError::InvalidDate(format!("{input}: {reason}"))
}
