use super::{
    billing_window::BillingWindow, entry::EntryView, project::Project,
    repeat_period::RepeatPeriod,
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ProjectTotal {
    pub project_id: i64,
    pub business_id: i64,
    pub project_name: String,
    pub hours: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct HoursSummary {
    pub project_totals: Vec<ProjectTotal>,
    pub total_hours: f64,
}

/// A project's entries inside one billing window.
#[derive(Debug, Clone)]
pub struct TimeSheet {
    pub project: Project,
    pub period: RepeatPeriod,
    pub window: BillingWindow,
    pub entries: Vec<EntryView>,
    pub total_hours: f64,
}
