use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Configured office holiday; seeds a locked row into any timesheet whose
/// week contains it.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Holiday {
    pub id: u64,
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "Victory Day")]
    pub label: String,
}
