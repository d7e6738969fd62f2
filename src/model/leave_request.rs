use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Approved leave windows are read (never written) by the timesheet loader
/// to seed "Leave Approved…" rows. The approval workflow itself lives in a
/// separate service.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct ApprovedLeave {
    pub id: u64,
    pub employee_id: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub leave_type: String,
}
