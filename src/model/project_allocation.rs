use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An allocation window tying an employee to a project; only currently
/// allocated projects are offered in the timesheet's project dropdown.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct ProjectAllocation {
    #[schema(example = "Atlas Migration")]
    pub name: String,
    #[schema(example = "ATL-01")]
    pub code: String,
    #[schema(value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = "date")]
    pub end_date: NaiveDate,
}
