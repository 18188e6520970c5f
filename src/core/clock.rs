use crate::core::projects::{require_activity, require_project};
use crate::db::entries::{
    EntryState, insert_entry, load_running_entries, load_user_entry, update_entry,
};
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::entry::Entry;
use crate::utils::time::format_ts;
use chrono::NaiveDateTime;

/// Result of a clock-in: the new entry and the entries it paused.
#[derive(Debug)]
pub struct ClockIn {
    pub entry: Entry,
    pub paused: Vec<Entry>,
}

/// Clock in / clock out / pause for the current user.
pub struct ClockLogic;

impl ClockLogic {
    /// Open a new entry on `project_id` at `now`. With `pause_open`, every
    /// other running entry of the same user is paused at `now` first.
    pub fn clock_in(
        pool: &mut DbPool,
        user: &str,
        project_id: i64,
        activity_id: Option<i64>,
        now: NaiveDateTime,
        pause_open: bool,
    ) -> AppResult<ClockIn> {
        let project = require_project(&pool.conn, project_id)?;
        if let Some(id) = activity_id {
            require_activity(&pool.conn, id)?;
        }

        let tx = pool.conn.transaction()?;

        let mut paused = Vec::new();
        if pause_open {
            for mut running in load_running_entries(&tx, user)? {
                running.pause(now);
                update_entry(&tx, &running)?;
                paused.push(running);
            }
        }

        let mut entry = Entry::clock_in(user, project_id, activity_id, now);
        entry.id = insert_entry(&tx, &entry)?;
        tx.commit()?;

        audit(
            &pool.conn,
            "clock_in",
            &format!("entry {}", entry.id),
            &format!("{} clocked into {} at {}", user, project.name, format_ts(&now)),
        );

        Ok(ClockIn { entry, paused })
    }

    /// Close an open entry of `user`. A paused entry is resumed at `now`
    /// first, so the pause counts as paused time.
    pub fn clock_out(
        pool: &mut DbPool,
        user: &str,
        entry_id: i64,
        activity_id: i64,
        comments: &str,
        now: NaiveDateTime,
    ) -> AppResult<Entry> {
        let mut entry = load_user_entry(&pool.conn, entry_id, user, EntryState::Open)?
            .ok_or(AppError::InvalidEntry(entry_id))?;
        require_activity(&pool.conn, activity_id)?;

        entry.clock_out(activity_id, comments, now)?;
        update_entry(&pool.conn, &entry)?;

        audit(
            &pool.conn,
            "clock_out",
            &format!("entry {}", entry.id),
            &format!("{} clocked out, {:.2} h", user, entry.hours),
        );

        Ok(entry)
    }

    /// Pause a running entry or resume a paused one.
    pub fn toggle_paused(
        pool: &mut DbPool,
        user: &str,
        entry_id: i64,
        now: NaiveDateTime,
    ) -> AppResult<Entry> {
        let mut entry = load_user_entry(&pool.conn, entry_id, user, EntryState::Open)?
            .ok_or(AppError::InvalidEntry(entry_id))?;

        entry.toggle_paused(now);
        update_entry(&pool.conn, &entry)?;

        let action = if entry.is_paused() { "pause" } else { "resume" };
        audit(
            &pool.conn,
            action,
            &format!("entry {}", entry.id),
            &format!("entry {} at {}", action, format_ts(&now)),
        );

        Ok(entry)
    }
}
