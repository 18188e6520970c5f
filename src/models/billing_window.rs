use chrono::NaiveDate;
use serde::Serialize;

/// One concrete billing interval `[date, end_date)` of a repeat period.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BillingWindow {
    pub id: i64,
    pub period_id: i64,
    pub project_id: i64,
    /// Index of the window within its period, 0 for the first one.
    pub sequence: i64,
    pub date: NaiveDate,
    /// Exclusive; equals the `date` of the next window.
    pub end_date: NaiveDate,
}

impl BillingWindow {
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.date <= day && day < self.end_date
    }

    /// Last day covered by the window, for display.
    pub fn last_day(&self) -> NaiveDate {
        self.end_date.pred_opt().unwrap_or(self.date)
    }

    pub fn days(&self) -> i64 {
        (self.end_date - self.date).num_days()
    }
}
