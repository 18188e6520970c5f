use crate::errors::{AppError, AppResult};
use crate::utils::time::{format_ts, seconds_between};
use chrono::{Local, NaiveDateTime};
use serde::Serialize;

/// One clock-in/clock-out record of a user on a project.
///
/// Open entries have no `end_time`; paused entries additionally carry a
/// `pause_time`. Closing an entry always clears `pause_time`.
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    pub id: i64,
    pub user: String,
    pub project_id: i64,
    pub activity_id: Option<i64>,
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub pause_time: Option<NaiveDateTime>,
    pub seconds_paused: i64,
    pub hours: f64,
    pub comments: String,
    #[serde(skip)]
    pub delete_key: String,
    pub created_at: String,
}

impl Entry {
    /// Fresh open entry starting at `now`, with zero hours and a new delete key.
    pub fn clock_in(
        user: &str,
        project_id: i64,
        activity_id: Option<i64>,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            id: 0,
            user: user.to_string(),
            project_id,
            activity_id,
            start_time: now,
            end_time: None,
            pause_time: None,
            seconds_paused: 0,
            hours: 0.0,
            comments: String::new(),
            delete_key: new_delete_key(),
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    pub fn is_paused(&self) -> bool {
        self.is_open() && self.pause_time.is_some()
    }

    pub fn pause(&mut self, now: NaiveDateTime) {
        if self.is_open() && self.pause_time.is_none() {
            self.pause_time = Some(now);
        }
    }

    /// Resume a paused entry; the pause length is added to `seconds_paused`.
    pub fn unpause(&mut self, now: NaiveDateTime) {
        if let Some(paused_at) = self.pause_time.take() {
            self.seconds_paused += seconds_between(paused_at, now).max(0);
        }
    }

    pub fn toggle_paused(&mut self, now: NaiveDateTime) {
        if self.is_paused() {
            self.unpause(now);
        } else {
            self.pause(now);
        }
    }

    pub fn clock_out(
        &mut self,
        activity_id: i64,
        comments: &str,
        now: NaiveDateTime,
    ) -> AppResult<()> {
        if !self.is_open() {
            return Err(AppError::InvalidEntry(self.id));
        }
        if now < self.start_time {
            return Err(AppError::InvalidTimeRange(format!(
                "clock-out {} is before clock-in {}",
                format_ts(&now),
                format_ts(&self.start_time)
            )));
        }

        self.unpause(now);
        self.end_time = Some(now);
        self.activity_id = Some(activity_id);
        self.comments = comments.to_string();
        self.recompute_hours();
        Ok(())
    }

    /// Seconds between start and end minus paused time; 0 while open.
    pub fn worked_seconds(&self) -> i64 {
        match self.end_time {
            Some(end) => (seconds_between(self.start_time, end) - self.seconds_paused).max(0),
            None => 0,
        }
    }

    pub fn recompute_hours(&mut self) {
        self.hours = seconds_to_hours(self.worked_seconds());
    }

    pub fn state_label(&self) -> &'static str {
        if self.is_paused() {
            "paused"
        } else if self.is_open() {
            "open"
        } else {
            "closed"
        }
    }
}

/// Entry joined with the names needed to display it.
#[derive(Debug, Clone, Serialize)]
pub struct EntryView {
    pub entry: Entry,
    pub project_name: String,
    pub business_id: i64,
    pub business_name: String,
    pub activity_code: Option<String>,
}

/// Hours rounded to two decimals.
pub fn seconds_to_hours(secs: i64) -> f64 {
    (secs as f64 / 36.0).round() / 100.0
}

fn new_delete_key() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
