use crate::db::entries::{project_totals, total_hours};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::summary::HoursSummary;
use chrono::NaiveDate;

pub struct SummaryLogic;

impl SummaryLogic {
    /// Hours per project plus the grand total, across all users.
    ///
    /// `from` keeps entries started on or after that day; `to` keeps entries
    /// that ended on or before that day (open entries drop out).
    pub fn summary(
        pool: &DbPool,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<HoursSummary> {
        if let (Some(f), Some(t)) = (from, to)
            && f > t
        {
            return Err(AppError::InvalidTimeRange(format!(
                "from {} is after to {}",
                f, t
            )));
        }

        Ok(HoursSummary {
            project_totals: project_totals(&pool.conn, from, to)?,
            total_hours: total_hours(&pool.conn, from, to)?,
        })
    }
}
