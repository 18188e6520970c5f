use super::{billing_window::BillingWindow, interval::Interval};
use crate::db::billing::{insert_window, last_window};
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;

/// Recurring billing cadence of a project: every `count` × `interval`.
///
/// Window `k` starts at `anchor_date + (k - anchor_index) × cadence` and ends
/// where window `k + 1` starts. Starts are always computed from the anchor,
/// never from the previous window, so month-end anchors do not drift.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RepeatPeriod {
    pub id: i64,
    pub project_id: i64,
    pub count: u32,
    pub interval: Interval,
    pub anchor_date: NaiveDate,
    pub anchor_index: i64,
    pub active: bool,
}

/// Bounds of a window that is not persisted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedWindow {
    pub sequence: i64,
    pub date: NaiveDate,
    pub end_date: NaiveDate,
}

impl RepeatPeriod {
    pub fn new(
        project_id: i64,
        count: i64,
        interval: Interval,
        anchor_date: NaiveDate,
        active: bool,
    ) -> AppResult<Self> {
        Ok(Self {
            id: 0,
            project_id,
            count: validate_count(count)?,
            interval,
            anchor_date,
            anchor_index: 0,
            active,
        })
    }

    pub fn window_start(&self, sequence: i64) -> Option<NaiveDate> {
        let offset = u32::try_from(sequence.checked_sub(self.anchor_index)?).ok()?;
        self.interval
            .add_to(self.anchor_date, offset.checked_mul(self.count)?)
    }

    pub fn window_at(&self, sequence: i64) -> Option<PlannedWindow> {
        let date = self.window_start(sequence)?;
        let end_date = self.window_start(sequence.checked_add(1)?)?;
        Some(PlannedWindow {
            sequence,
            date,
            end_date,
        })
    }

    /// Windows from `next_sequence` on whose start is not after `date_boundary`.
    /// The last planned window is the one containing the boundary.
    pub fn plan_windows(&self, next_sequence: i64, date_boundary: NaiveDate) -> Vec<PlannedWindow> {
        let mut planned = Vec::new();
        let mut sequence = next_sequence.max(self.anchor_index);

        while let Some(window) = self.window_at(sequence) {
            if window.date > date_boundary {
                break;
            }
            planned.push(window);
            sequence += 1;
        }

        planned
    }

    /// Persist every window missing up to `date_boundary` and return the new
    /// ones in date order. Calling it again with the same boundary is a no-op.
    pub fn update_billing_windows(
        &self,
        conn: &Connection,
        date_boundary: NaiveDate,
    ) -> AppResult<Vec<BillingWindow>> {
        let next_sequence = match last_window(conn, self.id)? {
            Some(last) => last.sequence + 1,
            None => self.anchor_index,
        };

        self.plan_windows(next_sequence, date_boundary)
            .iter()
            .map(|planned| insert_window(conn, self, planned))
            .collect()
    }

    /// Switch to a new cadence. Existing windows stay untouched: when there is
    /// a `last` window the anchor moves to its end so the next window starts
    /// exactly where it stops.
    pub fn reschedule(
        &mut self,
        count: i64,
        interval: Interval,
        last: Option<&BillingWindow>,
    ) -> AppResult<()> {
        let count = validate_count(count)?;
        if count == self.count && interval == self.interval {
            return Ok(());
        }

        if let Some(w) = last {
            self.anchor_date = w.end_date;
            self.anchor_index = w.sequence + 1;
        }
        self.count = count;
        self.interval = interval;
        Ok(())
    }

    pub fn describe(&self) -> String {
        format!("every {}", self.interval.label(self.count))
    }
}

fn validate_count(count: i64) -> AppResult<u32> {
    u32::try_from(count)
        .ok()
        .filter(|c| *c >= 1)
        .ok_or(AppError::InvalidCount(count))
}
