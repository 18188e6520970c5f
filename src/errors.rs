//! Unified application error type.
//! Every layer (db, core, cli, export) returns AppError so failures surface
//! to `main` the same way.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / serialization
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid repeat interval: {0} (use day, week, month or year)")]
    InvalidInterval(String),

    #[error("Invalid repeat count: {0} (must be at least 1)")]
    InvalidCount(i64),

    // ---------------------------
    // Entry errors
    // ---------------------------
    #[error("Invalid log entry: {0}")]
    InvalidEntry(i64),

    #[error("Entry {0} is still open; clock out before editing it")]
    EntryNotClosed(i64),

    #[error("Invalid time range: {0}")]
    InvalidTimeRange(String),

    #[error("Delete key does not match entry {0}")]
    DeleteKeyMismatch(i64),

    // ---------------------------
    // Lookup errors
    // ---------------------------
    #[error("No such project: {0}")]
    ProjectNotFound(i64),

    #[error("No such business: {0}")]
    BusinessNotFound(i64),

    #[error("No such activity: {0}")]
    ActivityNotFound(i64),

    #[error("Project {0} has no repeat period")]
    NoRepeatPeriod(i64),

    #[error("No billing window found for project {0}")]
    NoBillingWindow(i64),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
