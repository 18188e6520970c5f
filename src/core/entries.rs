use crate::core::projects::{require_activity, require_project};
use crate::db::entries::{
    EntryState, delete_entry, insert_entry, load_recent, load_user_entry, update_entry,
};
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::entry::{Entry, EntryView};
use crate::utils::date::days_ago;
use crate::utils::time::{format_ts, seconds_between};
use chrono::{NaiveDate, NaiveDateTime};

/// A past entry recorded after the fact.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub project_id: i64,
    pub activity_id: Option<i64>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub comments: String,
}

/// Fields to change on a closed entry; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct EntryChanges {
    pub project_id: Option<i64>,
    pub activity_id: Option<i64>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub comments: Option<String>,
}

pub struct EntryLogic;

impl EntryLogic {
    pub fn add(
        pool: &mut DbPool,
        user: &str,
        new: NewEntry,
        now: NaiveDateTime,
    ) -> AppResult<Entry> {
        require_project(&pool.conn, new.project_id)?;
        if let Some(id) = new.activity_id {
            require_activity(&pool.conn, id)?;
        }
        validate_range(new.start, new.end, now)?;

        let mut entry = Entry::clock_in(user, new.project_id, new.activity_id, new.start);
        entry.end_time = Some(new.end);
        entry.comments = new.comments;
        entry.recompute_hours();
        entry.id = insert_entry(&pool.conn, &entry)?;

        audit(
            &pool.conn,
            "add",
            &format!("entry {}", entry.id),
            &format!(
                "{} → {} ({:.2} h)",
                format_ts(&new.start),
                format_ts(&new.end),
                entry.hours
            ),
        );

        Ok(entry)
    }

    /// Edit a closed entry of `user` and recompute its hours.
    pub fn update(
        pool: &mut DbPool,
        user: &str,
        entry_id: i64,
        changes: EntryChanges,
        now: NaiveDateTime,
    ) -> AppResult<Entry> {
        let mut entry = load_user_entry(&pool.conn, entry_id, user, EntryState::Any)?
            .ok_or(AppError::InvalidEntry(entry_id))?;
        let Some(current_end) = entry.end_time else {
            return Err(AppError::EntryNotClosed(entry_id));
        };

        if let Some(project_id) = changes.project_id {
            require_project(&pool.conn, project_id)?;
            entry.project_id = project_id;
        }
        if let Some(activity_id) = changes.activity_id {
            require_activity(&pool.conn, activity_id)?;
            entry.activity_id = Some(activity_id);
        }
        if let Some(comments) = changes.comments {
            entry.comments = comments;
        }

        let start = changes.start.unwrap_or(entry.start_time);
        let end = changes.end.unwrap_or(current_end);
        validate_range(start, end, now)?;

        entry.start_time = start;
        entry.end_time = Some(end);
        if entry.seconds_paused > seconds_between(start, end) {
            entry.seconds_paused = 0;
        }
        entry.recompute_hours();
        update_entry(&pool.conn, &entry)?;

        audit(
            &pool.conn,
            "edit",
            &format!("entry {}", entry.id),
            &format!("updated, {:.2} h", entry.hours),
        );

        Ok(entry)
    }

    /// Delete an entry of `user`; `key` must equal the entry's delete key.
    pub fn delete(pool: &mut DbPool, user: &str, entry_id: i64, key: &str) -> AppResult<()> {
        let entry = load_user_entry(&pool.conn, entry_id, user, EntryState::Any)?
            .ok_or(AppError::InvalidEntry(entry_id))?;

        if key.is_empty() || key != entry.delete_key {
            return Err(AppError::DeleteKeyMismatch(entry_id));
        }

        delete_entry(&pool.conn, entry_id)?;
        audit(
            &pool.conn,
            "del",
            &format!("entry {}", entry_id),
            &format!("deleted entry started {}", format_ts(&entry.start_time)),
        );
        Ok(())
    }

    /// Delete key of an entry owned by `user`, shown before confirmation.
    pub fn delete_key(pool: &DbPool, user: &str, entry_id: i64) -> AppResult<String> {
        load_user_entry(&pool.conn, entry_id, user, EntryState::Any)?
            .map(|e| e.delete_key)
            .ok_or(AppError::InvalidEntry(entry_id))
    }

    /// Entries of `user` started within the last `days` days, newest first.
    pub fn recent(
        pool: &DbPool,
        user: &str,
        today: NaiveDate,
        days: u32,
    ) -> AppResult<Vec<EntryView>> {
        load_recent(&pool.conn, user, days_ago(today, days))
    }
}

fn validate_range(start: NaiveDateTime, end: NaiveDateTime, now: NaiveDateTime) -> AppResult<()> {
    if end <= start {
        return Err(AppError::InvalidTimeRange(format!(
            "end {} must be after start {}",
            format_ts(&end),
            format_ts(&start)
        )));
    }
    if end > now {
        return Err(AppError::InvalidTimeRange(format!(
            "end {} is in the future",
            format_ts(&end)
        )));
    }
    Ok(())
}
