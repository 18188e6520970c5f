use crate::core::projects::require_project;
use crate::db::billing::{load_period_for_project, load_project_window};
use crate::db::entries::{load_project_entries, round2};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::summary::TimeSheet;

/// Time sheet of a project for one billing window of its active period:
/// `window_id` when given, the most recent window otherwise.
pub fn project_time_sheet(
    pool: &DbPool,
    project_id: i64,
    window_id: Option<i64>,
) -> AppResult<TimeSheet> {
    let project = require_project(&pool.conn, project_id)?;

    let window = load_project_window(&pool.conn, project_id, window_id)?
        .ok_or(AppError::NoBillingWindow(project_id))?;
    let period = load_period_for_project(&pool.conn, project_id)?
        .ok_or(AppError::NoRepeatPeriod(project_id))?;

    let entries = load_project_entries(&pool.conn, project_id, window.date, window.end_date)?;
    let total_hours = round2(entries.iter().map(|v| v.entry.hours).sum());

    Ok(TimeSheet {
        project,
        period,
        window,
        entries,
        total_hours,
    })
}
