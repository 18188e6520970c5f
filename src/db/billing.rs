use super::{get_date, invalid_column};
use crate::errors::AppResult;
use crate::models::billing_window::BillingWindow;
use crate::models::interval::Interval;
use crate::models::repeat_period::{PlannedWindow, RepeatPeriod};
use crate::utils::date::format_date;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Row, params};

const PERIOD_COLUMNS: &str =
    "id, project_id, count, interval_unit, anchor_date, anchor_index, active";

const WINDOW_SELECT: &str = r#"
    SELECT w.id, w.period_id, rp.project_id, w.sequence, w.date, w.end_date
    FROM billing_windows w
    JOIN repeat_periods rp ON rp.id = w.period_id
"#;

fn map_period(row: &Row) -> rusqlite::Result<RepeatPeriod> {
    let raw_interval: String = row.get("interval_unit")?;
    let interval = Interval::from_db_str(&raw_interval)
        .ok_or_else(|| invalid_column("interval_unit", raw_interval.clone()))?;

    Ok(RepeatPeriod {
        id: row.get("id")?,
        project_id: row.get("project_id")?,
        count: row.get("count")?,
        interval,
        anchor_date: get_date(row, "anchor_date")?,
        anchor_index: row.get("anchor_index")?,
        active: row.get("active")?,
    })
}

fn map_window(row: &Row) -> rusqlite::Result<BillingWindow> {
    Ok(BillingWindow {
        id: row.get("id")?,
        period_id: row.get("period_id")?,
        project_id: row.get("project_id")?,
        sequence: row.get("sequence")?,
        date: get_date(row, "date")?,
        end_date: get_date(row, "end_date")?,
    })
}

// ---------------------------
// Repeat periods
// ---------------------------

pub fn insert_period(conn: &Connection, p: &RepeatPeriod) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO repeat_periods (project_id, count, interval_unit, anchor_date, anchor_index, active)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            p.project_id,
            p.count,
            p.interval.to_db_str(),
            format_date(&p.anchor_date),
            p.anchor_index,
            p.active,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_period(conn: &Connection, p: &RepeatPeriod) -> AppResult<()> {
    conn.execute(
        "UPDATE repeat_periods
         SET count = ?1, interval_unit = ?2, anchor_date = ?3, anchor_index = ?4, active = ?5
         WHERE id = ?6",
        params![
            p.count,
            p.interval.to_db_str(),
            format_date(&p.anchor_date),
            p.anchor_index,
            p.active,
            p.id,
        ],
    )?;
    Ok(())
}

pub fn load_period_for_project(
    conn: &Connection,
    project_id: i64,
) -> AppResult<Option<RepeatPeriod>> {
    let sql = format!("SELECT {PERIOD_COLUMNS} FROM repeat_periods WHERE project_id = ?1");
    let p = conn.query_row(&sql, [project_id], map_period).optional()?;
    Ok(p)
}

/// Active periods in id order: the iteration order of the refresh job.
pub fn load_active_periods(conn: &Connection) -> AppResult<Vec<RepeatPeriod>> {
    let sql =
        format!("SELECT {PERIOD_COLUMNS} FROM repeat_periods WHERE active = 1 ORDER BY id ASC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_period)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// Billing windows
// ---------------------------

pub fn insert_window(
    conn: &Connection,
    period: &RepeatPeriod,
    planned: &PlannedWindow,
) -> AppResult<BillingWindow> {
    conn.execute(
        "INSERT INTO billing_windows (period_id, sequence, date, end_date, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            period.id,
            planned.sequence,
            format_date(&planned.date),
            format_date(&planned.end_date),
            Local::now().to_rfc3339(),
        ],
    )?;

    Ok(BillingWindow {
        id: conn.last_insert_rowid(),
        period_id: period.id,
        project_id: period.project_id,
        sequence: planned.sequence,
        date: planned.date,
        end_date: planned.end_date,
    })
}

/// The window with the highest sequence of a period.
pub fn last_window(conn: &Connection, period_id: i64) -> AppResult<Option<BillingWindow>> {
    let sql = format!("{} ORDER BY w.sequence DESC LIMIT 1", period_filter());
    let w = conn.query_row(&sql, [period_id], map_window).optional()?;
    Ok(w)
}

pub fn load_windows_for_period(conn: &Connection, period_id: i64) -> AppResult<Vec<BillingWindow>> {
    let sql = format!("{} ORDER BY w.date ASC", period_filter());
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([period_id], map_window)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Window `window_id`, or the latest one by date, among the windows of the
/// project's active period.
pub fn load_project_window(
    conn: &Connection,
    project_id: i64,
    window_id: Option<i64>,
) -> AppResult<Option<BillingWindow>> {
    let base = format!("{WINDOW_SELECT} WHERE rp.project_id = ?1 AND rp.active = 1");

    let w = match window_id {
        Some(id) => conn
            .query_row(
                &format!("{base} AND w.id = ?2"),
                params![project_id, id],
                map_window,
            )
            .optional()?,
        None => conn
            .query_row(
                &format!("{base} ORDER BY w.date DESC LIMIT 1"),
                [project_id],
                map_window,
            )
            .optional()?,
    };
    Ok(w)
}

fn period_filter() -> String {
    format!("{WINDOW_SELECT} WHERE w.period_id = ?1")
}
