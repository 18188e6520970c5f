use crate::errors::{AppError, AppResult};
use chrono::{Days, Months, NaiveDate};
use serde::Serialize;

/// Calendar unit a repeat period is counted in.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Day,
    Week,
    Month,
    Year,
}

impl Interval {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Interval::Day => "day",
            Interval::Week => "week",
            Interval::Month => "month",
            Interval::Year => "year",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "day" => Some(Interval::Day),
            "week" => Some(Interval::Week),
            "month" => Some(Interval::Month),
            "year" => Some(Interval::Year),
            _ => None,
        }
    }

    /// Lenient CLI parsing: case-insensitive, singular/plural, one-letter codes.
    pub fn from_code(code: &str) -> AppResult<Self> {
        match code.trim().to_lowercase().as_str() {
            "d" | "day" | "days" | "daily" => Ok(Interval::Day),
            "w" | "week" | "weeks" | "weekly" => Ok(Interval::Week),
            "m" | "month" | "months" | "monthly" => Ok(Interval::Month),
            "y" | "year" | "years" | "yearly" => Ok(Interval::Year),
            _ => Err(AppError::InvalidInterval(code.to_string())),
        }
    }

    /// Move `date` forward by `steps` units.
    ///
    /// Month and year steps clamp to the last day of the target month
    /// (Jan 31 + 1 month = Feb 28/29). Returns `None` on calendar overflow.
    pub fn add_to(&self, date: NaiveDate, steps: u32) -> Option<NaiveDate> {
        match self {
            Interval::Day => date.checked_add_days(Days::new(u64::from(steps))),
            Interval::Week => date.checked_add_days(Days::new(u64::from(steps) * 7)),
            Interval::Month => date.checked_add_months(Months::new(steps)),
            Interval::Year => date.checked_add_months(Months::new(steps.checked_mul(12)?)),
        }
    }

    pub fn label(&self, count: u32) -> String {
        if count == 1 {
            self.to_db_str().to_string()
        } else {
            format!("{} {}s", count, self.to_db_str())
        }
    }
}
