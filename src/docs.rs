use crate::api::attendance::AttendanceRange;
use crate::api::holiday::{CreateHoliday, HolidayQuery};
use crate::api::project::AllocationQuery;
use crate::api::timesheet::{
    EditRequest, EditResponse, SaveRequest, TimesheetEnvelope, WeekQuery,
};
use crate::engine::aggregate::DerivedTotals;
use crate::engine::enforce::{Edit, EditOutcome};
use crate::engine::grid::{EntryKind, OnPremises, TimesheetStatus, WeekEntry, WeeklyTimesheet};
use crate::engine::policy::{ShiftPolicy, ShiftType};
use crate::engine::validate::SubmitCheck;
use crate::model::attendance::AttendanceRow;
use crate::model::holiday::Holiday;
use crate::model::project_allocation::ProjectAllocation;
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Timesheet HRM API",
        version = "1.0.0",
        description = r#"
## Weekly Timesheet Service

Backend for the employee weekly-timesheet workflow: project/leave hour
entry validated against shift policies, leave quotas and the on-premises
time derived from the biometric access-control device.

### 🔹 Key Features
- **Weekly Timesheet**
  - Load a week with reconciled on-premises time, validate each cell edit,
    save drafts, submit with itemized validation
- **Attendance**
  - Badge check-in/check-out sessions and range queries
- **Projects**
  - Allocated-project lookup restricting the timesheet dropdown
- **Holidays**
  - Office holiday calendar seeding locked timesheet rows

### 🔐 Security
All `/api` endpoints require **JWT Bearer authentication**; timesheet
endpoints additionally require the account to be linked to an employee
profile.

### 📦 Response Format
- JSON-based RESTful responses
- Edit rejections carry a stable `kind` code plus a human message

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::timesheet::get_timesheet,
        crate::api::timesheet::validate_edit,
        crate::api::timesheet::save_draft,
        crate::api::timesheet::submit_timesheet,

        crate::api::attendance::check_in,
        crate::api::attendance::check_out,
        crate::api::attendance::list_attendance,

        crate::api::project::allocated_projects,

        crate::api::holiday::list_holidays,
        crate::api::holiday::create_holiday
    ),
    components(
        schemas(
            WeekQuery,
            TimesheetEnvelope,
            EditRequest,
            EditResponse,
            SaveRequest,
            WeeklyTimesheet,
            WeekEntry,
            EntryKind,
            OnPremises,
            TimesheetStatus,
            ShiftType,
            ShiftPolicy,
            Edit,
            EditOutcome,
            DerivedTotals,
            SubmitCheck,
            AttendanceRow,
            AttendanceRange,
            Holiday,
            HolidayQuery,
            CreateHoliday,
            AllocationQuery,
            ProjectAllocation
        )
    ),
    tags(
        (name = "Timesheet", description = "Weekly timesheet loading, validation and submission"),
        (name = "Attendance", description = "Badge session APIs"),
        (name = "Projects", description = "Project allocation APIs"),
        (name = "Holidays", description = "Office holiday calendar APIs"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
