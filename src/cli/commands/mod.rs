pub mod activity;
pub mod backup;
pub mod business;
pub mod clock;
pub mod config;
pub mod db;
pub mod entry;
pub mod export;
pub mod init;
pub mod log;
pub mod period;
pub mod project;
pub mod sheet;
pub mod summary;
pub mod windows;

use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use crate::utils::date;
use chrono::NaiveDate;
use std::io::{self, Write};

/// Parse a `YYYY-MM-DD` command-line date.
pub(crate) fn parse_day(s: &str) -> AppResult<NaiveDate> {
    date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

pub(crate) fn parse_optional_day(s: Option<&String>) -> AppResult<Option<NaiveDate>> {
    s.map(|v| parse_day(v)).transpose()
}

/// Ask a yes/no confirmation from the user
pub(crate) fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}
