use crate::db::billing::{load_active_periods, load_period_for_project, load_windows_for_period};
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::billing_window::BillingWindow;
use crate::models::repeat_period::RepeatPeriod;
use crate::utils::date::format_date;
use chrono::NaiveDate;
use rusqlite::Connection;

/// Billing-window refresh job.
///
/// Brings every active repeat period up to `today` and returns the windows
/// created in this run: each period's new windows in date order, periods in
/// id order. The run is one transaction, so a failing period leaves no
/// partial result behind.
pub fn refresh_billing_windows(
    conn: &mut Connection,
    today: NaiveDate,
) -> AppResult<Vec<BillingWindow>> {
    let tx = conn.transaction()?;

    let mut windows = Vec::new();
    for period in load_active_periods(&tx)? {
        windows.extend(period.update_billing_windows(&tx, today)?);
    }

    tx.commit()?;
    Ok(windows)
}

pub struct BillingLogic;

impl BillingLogic {
    pub fn refresh(pool: &mut DbPool, today: NaiveDate) -> AppResult<Vec<BillingWindow>> {
        let windows = refresh_billing_windows(&mut pool.conn, today)?;

        audit(
            &pool.conn,
            "windows_refresh",
            &format_date(&today),
            &format!("{} new billing window(s)", windows.len()),
        );

        Ok(windows)
    }

    /// The project's repeat period and all of its windows, oldest first.
    pub fn project_windows(
        pool: &DbPool,
        project_id: i64,
    ) -> AppResult<(RepeatPeriod, Vec<BillingWindow>)> {
        let period = load_period_for_project(&pool.conn, project_id)?
            .ok_or(AppError::NoRepeatPeriod(project_id))?;
        let windows = load_windows_for_period(&pool.conn, period.id)?;
        Ok((period, windows))
    }
}
