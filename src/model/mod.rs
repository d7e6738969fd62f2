pub mod attendance;
pub mod holiday;
pub mod leave_request;
pub mod project_allocation;
pub mod role;
pub mod timesheet;
pub mod user;
