// src/export/model.rs

use crate::models::entry::EntryView;
use crate::utils::time::format_ts;
use serde::Serialize;

/// Flat row written by the CSV and JSON exporters.
#[derive(Serialize, Clone, Debug)]
pub struct EntryExport {
    pub id: i64,
    pub user: String,
    pub business: String,
    pub project_id: i64,
    pub project: String,
    pub activity: String,
    pub start_time: String,
    pub end_time: String,
    pub seconds_paused: i64,
    pub hours: f64,
    pub comments: String,
}

impl From<&EntryView> for EntryExport {
    fn from(v: &EntryView) -> Self {
        let e = &v.entry;
        Self {
            id: e.id,
            user: e.user.clone(),
            business: v.business_name.clone(),
            project_id: e.project_id,
            project: v.project_name.clone(),
            activity: v.activity_code.clone().unwrap_or_default(),
            start_time: format_ts(&e.start_time),
            end_time: e.end_time.as_ref().map(format_ts).unwrap_or_default(),
            seconds_paused: e.seconds_paused,
            hours: e.hours,
            comments: e.comments.clone(),
        }
    }
}
