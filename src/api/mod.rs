pub mod attendance;
pub mod holiday;
pub mod project;
pub mod timesheet;
