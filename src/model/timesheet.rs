use chrono::{NaiveDate, NaiveDateTime};
use sqlx::FromRow;
use sqlx::types::Json;

use crate::engine::grid::WeeklyTimesheet;

/// One persisted weekly timesheet: the whole grid is a single JSON document,
/// with status/totals mirrored into columns for listing and reporting.
/// `updated_at` doubles as the optimistic-concurrency token.
#[derive(Debug, FromRow)]
pub struct TimesheetRow {
    pub id: u64,
    pub employee_id: u64,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub doc: Json<WeeklyTimesheet>,
    pub status: String,
    pub total_hours: f64,
    pub updated_at: NaiveDateTime,
}
