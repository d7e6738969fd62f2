use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One badge-in/badge-out pair as stored from the access-control device.
/// A day may hold several rows when the employee leaves the premises.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceRow {
    pub id: u64,
    pub employee_id: u64,
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(value_type = String, format = "time", nullable = true)]
    pub check_in: Option<NaiveTime>,
    #[schema(value_type = String, format = "time", nullable = true)]
    pub check_out: Option<NaiveTime>,
}
