pub mod billing_window;
pub mod entry;
pub mod interval;
pub mod project;
pub mod repeat_period;
pub mod summary;
