use super::{get_opt_ts, get_ts};
use crate::errors::AppResult;
use crate::models::entry::{Entry, EntryView};
use crate::models::summary::ProjectTotal;
use crate::utils::date::{next_day, start_of_day};
use crate::utils::time::format_ts;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, ToSql, params, params_from_iter};

const VIEW_SELECT: &str = r#"
    SELECT e.id, e.username, e.project_id, e.activity_id, e.start_time, e.end_time,
           e.pause_time, e.seconds_paused, e.hours, e.comments, e.delete_key, e.created_at,
           p.name AS project_name, p.business_id AS business_id, b.name AS business_name,
           a.code AS activity_code
    FROM entries e
    JOIN projects p ON p.id = e.project_id
    JOIN businesses b ON b.id = p.business_id
    LEFT JOIN activities a ON a.id = e.activity_id
"#;

/// Which entries of a user a lookup may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    Any,
    Open,
}

impl EntryState {
    fn clause(&self) -> &'static str {
        match self {
            EntryState::Any => "",
            EntryState::Open => " AND end_time IS NULL",
        }
    }
}

pub fn map_entry(row: &Row) -> rusqlite::Result<Entry> {
    Ok(Entry {
        id: row.get("id")?,
        user: row.get("username")?,
        project_id: row.get("project_id")?,
        activity_id: row.get("activity_id")?,
        start_time: get_ts(row, "start_time")?,
        end_time: get_opt_ts(row, "end_time")?,
        pause_time: get_opt_ts(row, "pause_time")?,
        seconds_paused: row.get("seconds_paused")?,
        hours: row.get("hours")?,
        comments: row.get("comments")?,
        delete_key: row.get("delete_key")?,
        created_at: row.get("created_at")?,
    })
}

fn map_view(row: &Row) -> rusqlite::Result<EntryView> {
    Ok(EntryView {
        entry: map_entry(row)?,
        project_name: row.get("project_name")?,
        business_id: row.get("business_id")?,
        business_name: row.get("business_name")?,
        activity_code: row.get("activity_code")?,
    })
}

pub fn insert_entry(conn: &Connection, e: &Entry) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO entries (username, project_id, activity_id, start_time, end_time, pause_time,
                              seconds_paused, hours, comments, delete_key, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            e.user,
            e.project_id,
            e.activity_id,
            format_ts(&e.start_time),
            e.end_time.as_ref().map(format_ts),
            e.pause_time.as_ref().map(format_ts),
            e.seconds_paused,
            e.hours,
            e.comments,
            e.delete_key,
            e.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_entry(conn: &Connection, e: &Entry) -> AppResult<()> {
    conn.execute(
        "UPDATE entries
         SET project_id = ?1, activity_id = ?2, start_time = ?3, end_time = ?4,
             pause_time = ?5, seconds_paused = ?6, hours = ?7, comments = ?8
         WHERE id = ?9",
        params![
            e.project_id,
            e.activity_id,
            format_ts(&e.start_time),
            e.end_time.as_ref().map(format_ts),
            e.pause_time.as_ref().map(format_ts),
            e.seconds_paused,
            e.hours,
            e.comments,
            e.id,
        ],
    )?;
    Ok(())
}

pub fn delete_entry(conn: &Connection, id: i64) -> AppResult<()> {
    conn.execute("DELETE FROM entries WHERE id = ?1", [id])?;
    Ok(())
}

pub fn load_entry(conn: &Connection, id: i64) -> AppResult<Option<Entry>> {
    let entry = conn
        .query_row("SELECT * FROM entries WHERE id = ?1", [id], map_entry)
        .optional()?;
    Ok(entry)
}

/// Entry `id` if it belongs to `user` and is in the requested state.
pub fn load_user_entry(
    conn: &Connection,
    id: i64,
    user: &str,
    state: EntryState,
) -> AppResult<Option<Entry>> {
    let sql = format!(
        "SELECT * FROM entries WHERE id = ?1 AND username = ?2{}",
        state.clause()
    );
    let entry = conn
        .query_row(&sql, params![id, user], map_entry)
        .optional()?;
    Ok(entry)
}

/// Open entries of `user` that are not paused.
pub fn load_running_entries(conn: &Connection, user: &str) -> AppResult<Vec<Entry>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM entries
         WHERE username = ?1 AND end_time IS NULL AND pause_time IS NULL
         ORDER BY start_time ASC",
    )?;
    let rows = stmt.query_map([user], map_entry)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn query_views(
    conn: &Connection,
    filter: &str,
    order: &str,
    args: &[&dyn ToSql],
) -> AppResult<Vec<EntryView>> {
    let sql = format!("{VIEW_SELECT} {filter} ORDER BY {order}");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(args, map_view)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Entries of `user` started on or after `since`, newest first.
pub fn load_recent(conn: &Connection, user: &str, since: NaiveDate) -> AppResult<Vec<EntryView>> {
    query_views(
        conn,
        "WHERE e.username = ?1 AND e.start_time >= ?2",
        "e.start_time DESC, e.id DESC",
        &[&user, &format_ts(&start_of_day(since))],
    )
}

/// Entries of a project started in `[from, until)`, oldest first.
pub fn load_project_entries(
    conn: &Connection,
    project_id: i64,
    from: NaiveDate,
    until: NaiveDate,
) -> AppResult<Vec<EntryView>> {
    query_views(
        conn,
        "WHERE e.project_id = ?1 AND e.start_time >= ?2 AND e.start_time < ?3",
        "e.start_time ASC, e.id ASC",
        &[
            &project_id,
            &format_ts(&start_of_day(from)),
            &format_ts(&start_of_day(until)),
        ],
    )
}

/// All entries, or those started within the inclusive date bounds.
pub fn load_entries_between(
    conn: &Connection,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<EntryView>> {
    match bounds {
        None => query_views(conn, "", "e.start_time ASC, e.id ASC", &[]),
        Some((from, to)) => query_views(
            conn,
            "WHERE e.start_time >= ?1 AND e.start_time < ?2",
            "e.start_time ASC, e.id ASC",
            &[
                &format_ts(&start_of_day(from)),
                &format_ts(&start_of_day(next_day(to))),
            ],
        ),
    }
}

/// WHERE clause for summaries: start on/after `from`, end before the day
/// after `to`. Open entries never satisfy an upper bound.
fn summary_filter(from: Option<NaiveDate>, to: Option<NaiveDate>) -> (String, Vec<String>) {
    let mut clauses = Vec::new();
    let mut args = Vec::new();

    if let Some(f) = from {
        args.push(format_ts(&start_of_day(f)));
        clauses.push(format!("e.start_time >= ?{}", args.len()));
    }
    if let Some(t) = to {
        args.push(format_ts(&start_of_day(next_day(t))));
        clauses.push(format!("e.end_time < ?{}", args.len()));
    }

    if clauses.is_empty() {
        (String::new(), args)
    } else {
        (format!("WHERE {}", clauses.join(" AND ")), args)
    }
}

pub fn project_totals(
    conn: &Connection,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> AppResult<Vec<ProjectTotal>> {
    let (filter, args) = summary_filter(from, to);
    let sql = format!(
        "SELECT p.id AS project_id, p.business_id AS business_id, p.name AS project_name,
                COALESCE(SUM(e.hours), 0.0) AS hours
         FROM entries e
         JOIN projects p ON p.id = e.project_id
         {filter}
         GROUP BY p.id, p.business_id, p.name
         ORDER BY p.id, p.business_id, p.name"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args.iter()), |row| {
        Ok(ProjectTotal {
            project_id: row.get("project_id")?,
            business_id: row.get("business_id")?,
            project_name: row.get("project_name")?,
            hours: round2(row.get("hours")?),
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn total_hours(
    conn: &Connection,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> AppResult<f64> {
    let (filter, args) = summary_filter(from, to);
    let sql = format!("SELECT COALESCE(SUM(e.hours), 0.0) FROM entries e {filter}");
    let total: f64 = conn.query_row(&sql, params_from_iter(args.iter()), |row| row.get(0))?;
    Ok(round2(total))
}

pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
