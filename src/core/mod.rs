pub mod backup;
pub mod billing;
pub mod clock;
pub mod entries;
pub mod log;
pub mod projects;
pub mod summary;
pub mod timesheet;
