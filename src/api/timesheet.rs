use actix_web::{HttpResponse, Responder, web};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use sqlx::types::Json;
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};

use crate::auth::auth::AuthUser;
use crate::engine::EngineError;
use crate::engine::aggregate::{self, DerivedTotals};
use crate::engine::enforce::{self, Edit, EditOutcome};
use crate::engine::grid::{self, TimesheetStatus, WeeklyTimesheet};
use crate::engine::reconcile::{self, AttendanceRecord, PunchPair};
use crate::engine::timecodec;
use crate::engine::validate::{self, SubmitCheck};
use crate::model::leave_request::ApprovedLeave;
use crate::model::project_allocation::ProjectAllocation;

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct WeekQuery {
    /// Any date inside the wanted week; normalized to its Monday.
    #[param(example = "2026-08-17")]
    #[schema(example = "2026-08-17", value_type = String, format = "date")]
    pub week_start: NaiveDate,
}

/// Everything the timesheet page needs for one week.
#[derive(Serialize, ToSchema)]
pub struct TimesheetEnvelope {
    pub timesheet: WeeklyTimesheet,
    pub totals: DerivedTotals,
    pub check: SubmitCheck,
    pub allocated_projects: Vec<ProjectAllocation>,
    /// Concurrency token to echo back on save/submit; absent for a week
    /// that was never saved.
    #[schema(value_type = Option<String>, format = "date-time")]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Deserialize, ToSchema)]
pub struct EditRequest {
    pub timesheet: WeeklyTimesheet,
    pub edit: Edit,
}

#[derive(Serialize, ToSchema)]
pub struct EditResponse {
    pub accepted: bool,
    /// Value now in the cell (the prior value when not accepted).
    pub value: f64,
    /// `H:MM` rendering of `value`.
    pub display: String,
    pub warning: Option<String>,
    pub totals: DerivedTotals,
    pub check: SubmitCheck,
}

#[derive(Deserialize, ToSchema)]
pub struct SaveRequest {
    pub timesheet: WeeklyTimesheet,
    /// Token from the last load/save; required once the week exists.
    #[schema(value_type = Option<String>, format = "date-time")]
    pub expected_updated_at: Option<NaiveDateTime>,
}

fn internal<E: std::fmt::Display>(context: &'static str) -> impl FnOnce(E) -> actix_web::Error {
    move |e| {
        tracing::error!(error = %e, context, "Timesheet query failed");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    }
}

fn engine_error_json(e: &EngineError) -> serde_json::Value {
    json!({ "kind": e.kind(), "message": e.to_string() })
}

/* =========================
Week loading
========================= */

async fn load_row(
    pool: &MySqlPool,
    employee_id: u64,
    week_start: NaiveDate,
) -> Result<Option<crate::model::timesheet::TimesheetRow>, sqlx::Error> {
    sqlx::query_as::<_, crate::model::timesheet::TimesheetRow>(
        r#"
        SELECT id, employee_id, week_start, week_end, doc, status, total_hours, updated_at
        FROM timesheets
        WHERE employee_id = ? AND week_start = ?
        "#,
    )
    .bind(employee_id)
    .bind(week_start)
    .fetch_optional(pool)
    .await
}

async fn load_holidays(
    pool: &MySqlPool,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<NaiveDate>, sqlx::Error> {
    sqlx::query_as::<_, (NaiveDate,)>(
        r#"SELECT date FROM holidays WHERE date BETWEEN ? AND ? ORDER BY date"#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await
    .map(|rows| rows.into_iter().map(|(d,)| d).collect())
}

async fn load_allocations(
    pool: &MySqlPool,
    employee_id: u64,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<ProjectAllocation>, sqlx::Error> {
    sqlx::query_as::<_, ProjectAllocation>(
        r#"
        SELECT p.name, p.code, a.start_date, a.end_date
        FROM project_allocations a
        JOIN projects p ON p.id = a.project_id
        WHERE a.employee_id = ? AND a.start_date <= ? AND a.end_date >= ?
        ORDER BY p.name
        "#,
    )
    .bind(employee_id)
    .bind(end)
    .bind(start)
    .fetch_all(pool)
    .await
}

async fn load_approved_leaves(
    pool: &MySqlPool,
    employee_id: u64,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<ApprovedLeave>, sqlx::Error> {
    sqlx::query_as::<_, ApprovedLeave>(
        r#"
        SELECT id, employee_id, start_date, end_date, leave_type
        FROM leave_requests
        WHERE employee_id = ? AND status = 'approved'
          AND start_date <= ? AND end_date >= ?
        "#,
    )
    .bind(employee_id)
    .bind(end)
    .bind(start)
    .fetch_all(pool)
    .await
}

/// Attendance rows for the week, folded into the reconciler's record shape:
/// one record per date, each badge pair a session in seconds-of-day.
async fn load_attendance_records(
    pool: &MySqlPool,
    employee_id: u64,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, crate::model::attendance::AttendanceRow>(
        r#"
        SELECT id, employee_id, date, check_in, check_out
        FROM attendance
        WHERE employee_id = ? AND date BETWEEN ? AND ?
        ORDER BY date, check_in
        "#,
    )
    .bind(employee_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    let mut by_date: BTreeMap<NaiveDate, Vec<PunchPair>> = BTreeMap::new();
    for row in rows {
        by_date.entry(row.date).or_default().push(PunchPair {
            clock_in: row.check_in.map(|t| json!(t.num_seconds_from_midnight())),
            clock_out: row.check_out.map(|t| json!(t.num_seconds_from_midnight())),
        });
    }
    Ok(by_date
        .into_iter()
        .map(|(date, sessions)| AttendanceRecord {
            date,
            duration: None,
            sessions,
        })
        .collect())
}

/// Overlay approved leave requests as locked "Leave Approved…" rows and lock
/// the consumed days on every other row. Skipped for submitted weeks.
fn seed_approved_leaves(doc: &mut WeeklyTimesheet, leaves: &[ApprovedLeave]) {
    for leave in leaves {
        let label = format!("{} ({})", grid::APPROVED_LEAVE_PREFIX, leave.leave_type);
        if doc.entries.iter().any(|e| e.task == label) {
            continue;
        }
        let mut daily_hours = [0.0; grid::DAYS_PER_WEEK];
        let mut any = false;
        for day in 0..grid::DAYS_PER_WEEK {
            let date = doc.date_of(day);
            if date >= leave.start_date && date <= leave.end_date && !grid::is_weekend(day) {
                daily_hours[day] = crate::engine::policy::FULL_DAY_HOURS;
                any = true;
            }
        }
        if !any {
            continue;
        }
        for entry in &mut doc.entries {
            for day in 0..grid::DAYS_PER_WEEK {
                if daily_hours[day] > 0.0 {
                    entry.daily_hours[day] = 0.0;
                    entry.locked_days[day] = true;
                }
            }
        }
        doc.entries.push(grid::WeekEntry {
            kind: grid::EntryKind::Leave,
            task: label,
            daily_hours,
            locked: true,
            locked_days: [false; grid::DAYS_PER_WEEK],
        });
    }
}

#[utoipa::path(
    get,
    path = "/api/timesheet",
    params(WeekQuery),
    responses(
        (status = 200, description = "Timesheet for the requested week", body = TimesheetEnvelope),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "No employee profile"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Timesheet"
)]
pub async fn get_timesheet(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<WeekQuery>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee()?;

    let (week_start, week_end) = grid::week_bounds(query.week_start);
    let pool = pool.get_ref();

    // Independent collaborators, fetched concurrently and reconciled once
    // all settle.
    let (row, attendance, holidays, allocations, leaves) = futures::try_join!(
        load_row(pool, employee_id, week_start),
        load_attendance_records(pool, employee_id, week_start, week_end),
        load_holidays(pool, week_start, week_end),
        load_allocations(pool, employee_id, week_start, week_end),
        load_approved_leaves(pool, employee_id, week_start, week_end),
    )
    .map_err(internal("load week"))?;

    let updated_at = row.as_ref().map(|r| r.updated_at);
    let persisted_snapshot = row.as_ref().map(|r| r.doc.0.on_premises.clone());

    let mut doc = match row {
        Some(r) => r.doc.0,
        None => WeeklyTimesheet::for_week(week_start, &holidays),
    };

    if doc.status == TimesheetStatus::Draft {
        seed_approved_leaves(&mut doc, &leaves);
    }

    let fresh = reconcile::compute_envelope(&attendance, week_start);
    doc.on_premises = reconcile::reconcile(fresh, persisted_snapshot.as_ref());

    let totals = aggregate::derive_totals(&doc);
    doc.total_hours = totals.weekly_total;
    let check = validate::submit_eligibility(&doc);

    Ok(HttpResponse::Ok().json(TimesheetEnvelope {
        timesheet: doc,
        totals,
        check,
        allocated_projects: allocations,
        updated_at,
    }))
}

/* =========================
Edit validation
========================= */

/// Permission units already persisted in other weeks of the month holding
/// the edited day.
async fn prior_month_permission_units(
    pool: &MySqlPool,
    employee_id: u64,
    edited_date: NaiveDate,
    current_week_start: NaiveDate,
) -> Result<u32, sqlx::Error> {
    let year = edited_date.year();
    let month = edited_date.month();
    let month_start = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(edited_date);
    // Weeks straddling the month boundary start up to six days early.
    let window_start = month_start - Duration::days(6);
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .unwrap_or(edited_date);

    let docs = sqlx::query_as::<_, (Json<WeeklyTimesheet>,)>(
        r#"
        SELECT doc FROM timesheets
        WHERE employee_id = ? AND week_start >= ? AND week_start < ? AND week_start <> ?
        "#,
    )
    .bind(employee_id)
    .bind(window_start)
    .bind(next_month)
    .bind(current_week_start)
    .fetch_all(pool)
    .await?;

    Ok(docs
        .iter()
        .map(|(doc,)| aggregate::permission_units_in_month(&doc.0, year, month))
        .sum())
}

#[utoipa::path(
    post,
    path = "/api/timesheet/edit",
    request_body = EditRequest,
    responses(
        (status = 200, description = "Edit applied or silently reverted", body = EditResponse),
        (status = 422, description = "Edit rejected with a message", body = Object, example = json!({
            "kind": "QuotaExceeded",
            "message": "Monthly permission quota exceeded: 2 of 3 units already used, this entry needs 2"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "No employee profile")
    ),
    security(("bearer_auth" = [])),
    tag = "Timesheet"
)]
pub async fn validate_edit(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<EditRequest>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee()?;

    let EditRequest { mut timesheet, edit } = payload.into_inner();

    let prior_units = if edit.day < grid::DAYS_PER_WEEK {
        prior_month_permission_units(
            pool.get_ref(),
            employee_id,
            timesheet.date_of(edit.day),
            timesheet.week_start,
        )
        .await
        .map_err(internal("load month permissions"))?
    } else {
        0
    };

    let prior_value = timesheet
        .entries
        .get(edit.row)
        .map(|e| e.daily_hours.get(edit.day).copied().unwrap_or(0.0))
        .unwrap_or(0.0);

    match enforce::apply_edit(&mut timesheet, &edit, prior_units) {
        Ok(EditOutcome { value, warning }) => {
            let totals = aggregate::derive_totals(&timesheet);
            let check = validate::submit_eligibility(&timesheet);
            Ok(HttpResponse::Ok().json(EditResponse {
                accepted: true,
                value,
                display: timecodec::format_hours_hhmm(value),
                warning,
                totals,
                check,
            }))
        }
        // Silent revert: the cell simply is not editable right now.
        Err(EngineError::NotEditable(reason)) => {
            tracing::debug!(%reason, row = edit.row, day = edit.day, "Edit reverted");
            let totals = aggregate::derive_totals(&timesheet);
            let check = validate::submit_eligibility(&timesheet);
            Ok(HttpResponse::Ok().json(EditResponse {
                accepted: false,
                value: prior_value,
                display: timecodec::format_hours_hhmm(prior_value),
                warning: None,
                totals,
                check,
            }))
        }
        Err(e) => Ok(HttpResponse::UnprocessableEntity().json(engine_error_json(&e))),
    }
}

/* =========================
Draft / submit
========================= */

enum UpsertOutcome {
    Saved(NaiveDateTime),
    Conflict,
}

fn is_duplicate_key(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23000"),
        _ => false,
    }
}

/// Single-document upsert with an `updated_at` compare-and-swap: an existing
/// row is only overwritten when the client echoes the token it loaded. Runs
/// in one transaction so the returned token is this writer's, not a later
/// one's; a first save losing the insert race reads as a conflict too.
async fn upsert_timesheet(
    pool: &MySqlPool,
    employee_id: u64,
    doc: &WeeklyTimesheet,
    expected_updated_at: Option<NaiveDateTime>,
) -> Result<UpsertOutcome, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let existing = sqlx::query_as::<_, (u64, NaiveDateTime)>(
        r#"
        SELECT id, updated_at FROM timesheets
        WHERE employee_id = ? AND week_start = ?
        FOR UPDATE
        "#,
    )
    .bind(employee_id)
    .bind(doc.week_start)
    .fetch_optional(&mut *tx)
    .await?;

    match existing {
        None => {
            let inserted = sqlx::query(
                r#"
                INSERT INTO timesheets
                    (employee_id, week_start, week_end, doc, status, total_hours)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(employee_id)
            .bind(doc.week_start)
            .bind(doc.week_end)
            .bind(Json(doc))
            .bind(doc.status.to_string())
            .bind(doc.total_hours)
            .execute(&mut *tx)
            .await;
            match inserted {
                Ok(_) => {}
                // Concurrent first save won the UNIQUE(employee_id, week_start)
                Err(e) if is_duplicate_key(&e) => return Ok(UpsertOutcome::Conflict),
                Err(e) => return Err(e),
            }
        }
        Some((id, stored)) => {
            if expected_updated_at != Some(stored) {
                return Ok(UpsertOutcome::Conflict);
            }
            let result = sqlx::query(
                r#"
                UPDATE timesheets
                SET doc = ?, status = ?, total_hours = ?
                WHERE id = ? AND updated_at = ?
                "#,
            )
            .bind(Json(doc))
            .bind(doc.status.to_string())
            .bind(doc.total_hours)
            .bind(id)
            .bind(stored)
            .execute(&mut *tx)
            .await?;
            if result.rows_affected() == 0 {
                return Ok(UpsertOutcome::Conflict);
            }
        }
    }

    let (token,) = sqlx::query_as::<_, (NaiveDateTime,)>(
        r#"SELECT updated_at FROM timesheets WHERE employee_id = ? AND week_start = ?"#,
    )
    .bind(employee_id)
    .bind(doc.week_start)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(UpsertOutcome::Saved(token))
}

/// Shared draft/submit persistence path.
async fn persist(
    auth: &AuthUser,
    pool: &MySqlPool,
    mut doc: WeeklyTimesheet,
    expected_updated_at: Option<NaiveDateTime>,
    submit: bool,
) -> actix_web::Result<HttpResponse> {
    let employee_id = auth.require_employee()?;

    // Normalize the week anchor regardless of what the client sent.
    let (week_start, week_end) = grid::week_bounds(doc.week_start);
    doc.week_start = week_start;
    doc.week_end = week_end;

    if !validate::has_some_data(&doc) {
        return Ok(
            HttpResponse::UnprocessableEntity().json(engine_error_json(&EngineError::EmptyDraft))
        );
    }

    // A submitted week is terminal for the employee.
    let stored_status = sqlx::query_as::<_, (String,)>(
        r#"SELECT status FROM timesheets WHERE employee_id = ? AND week_start = ?"#,
    )
    .bind(employee_id)
    .bind(week_start)
    .fetch_optional(pool)
    .await
    .map_err(internal("load status"))?;
    if let Some((status,)) = stored_status {
        if status != TimesheetStatus::Draft.to_string() {
            return Ok(HttpResponse::BadRequest().json(json!({
                "message": "Timesheet is already submitted"
            })));
        }
    }

    if submit {
        if let Err(errors) = validate::validate_submit(&doc) {
            return Ok(HttpResponse::UnprocessableEntity().json(json!({
                "message": "Timesheet is not ready to submit",
                "errors": errors.iter().map(engine_error_json).collect::<Vec<_>>()
            })));
        }
        doc.status = TimesheetStatus::Submitted;
    } else {
        doc.status = TimesheetStatus::Draft;
    }
    doc.total_hours = aggregate::derive_totals(&doc).weekly_total;

    match upsert_timesheet(pool, employee_id, &doc, expected_updated_at)
        .await
        .map_err(internal("save timesheet"))?
    {
        UpsertOutcome::Conflict => Ok(HttpResponse::Conflict()
            .json(engine_error_json(&EngineError::EditConflict))),
        UpsertOutcome::Saved(token) => {
            tracing::info!(
                employee_id,
                week_start = %week_start,
                status = %doc.status,
                total_hours = doc.total_hours,
                "Timesheet saved"
            );
            Ok(HttpResponse::Ok().json(json!({
                "message": if submit { "Timesheet submitted" } else { "Draft saved" },
                "status": doc.status.to_string(),
                "updated_at": token
            })))
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/timesheet/draft",
    request_body = SaveRequest,
    responses(
        (status = 200, description = "Draft saved", body = Object, example = json!({
            "message": "Draft saved", "status": "Draft"
        })),
        (status = 409, description = "Concurrent modification, reload first"),
        (status = 422, description = "Nothing to save"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "No employee profile")
    ),
    security(("bearer_auth" = [])),
    tag = "Timesheet"
)]
pub async fn save_draft(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<SaveRequest>,
) -> actix_web::Result<impl Responder> {
    let SaveRequest {
        timesheet,
        expected_updated_at,
    } = payload.into_inner();
    persist(&auth, pool.get_ref(), timesheet, expected_updated_at, false).await
}

#[utoipa::path(
    post,
    path = "/api/timesheet/submit",
    request_body = SaveRequest,
    responses(
        (status = 200, description = "Timesheet submitted", body = Object, example = json!({
            "message": "Timesheet submitted", "status": "Submitted"
        })),
        (status = 409, description = "Concurrent modification, reload first"),
        (status = 422, description = "Validation failed", body = Object, example = json!({
            "message": "Timesheet is not ready to submit",
            "errors": [{"kind": "ShiftNotSelected", "message": "No shift selected for: Mon"}]
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "No employee profile")
    ),
    security(("bearer_auth" = [])),
    tag = "Timesheet"
)]
pub async fn submit_timesheet(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<SaveRequest>,
) -> actix_web::Result<impl Responder> {
    let SaveRequest {
        timesheet,
        expected_updated_at,
    } = payload.into_inner();
    persist(&auth, pool.get_ref(), timesheet, expected_updated_at, true).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::grid::{EntryKind, WeekEntry};

    fn week() -> WeeklyTimesheet {
        WeeklyTimesheet::for_week(NaiveDate::from_ymd_opt(2026, 8, 17).unwrap(), &[])
    }

    fn leave(employee_id: u64, start: (u32, u32), end: (u32, u32), kind: &str) -> ApprovedLeave {
        ApprovedLeave {
            id: 1,
            employee_id,
            start_date: NaiveDate::from_ymd_opt(2026, start.0, start.1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, end.0, end.1).unwrap(),
            leave_type: kind.to_string(),
        }
    }

    #[derive(Debug)]
    struct DupKey;

    impl std::fmt::Display for DupKey {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("Duplicate entry")
        }
    }

    impl std::error::Error for DupKey {}

    impl sqlx::error::DatabaseError for DupKey {
        fn message(&self) -> &str {
            "Duplicate entry"
        }
        fn code(&self) -> Option<std::borrow::Cow<'_, str>> {
            Some("23000".into())
        }
        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }
        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }
        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }
        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::UniqueViolation
        }
    }

    // A first save losing the insert race must read as a save conflict, not
    // bubble up as an internal error.
    #[test]
    fn duplicate_week_key_maps_to_conflict() {
        assert!(is_duplicate_key(&sqlx::Error::Database(Box::new(DupKey))));
        assert!(!is_duplicate_key(&sqlx::Error::RowNotFound));
    }

    #[test]
    fn approved_leave_seeds_locked_row_and_locks_days() {
        let mut doc = week();
        doc.entries[0] = WeekEntry {
            kind: EntryKind::Project {
                label: "Atlas".into(),
                code: "ATL-01".into(),
            },
            task: "Development".into(),
            daily_hours: [2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            locked: false,
            locked_days: [false; 7],
        };
        // Mon-Tue approved annual leave
        seed_approved_leaves(&mut doc, &[leave(7, (8, 17), (8, 18), "annual")]);

        assert_eq!(doc.entries.len(), 2);
        let row = &doc.entries[1];
        assert!(row.locked);
        assert_eq!(row.task, "Leave Approved (annual)");
        assert_eq!(row.daily_hours[0], 9.5);
        assert_eq!(row.daily_hours[1], 9.5);
        assert_eq!(row.daily_hours[2], 0.0);
        // prior project hours on the consumed day are wiped and locked
        assert_eq!(doc.entries[0].daily_hours[0], 0.0);
        assert!(doc.entries[0].locked_days[0]);
        assert!(!doc.entries[0].locked_days[2]);
    }

    #[test]
    fn approved_leave_skips_weekends_and_duplicates() {
        let mut doc = week();
        // Sat-Sun window contributes nothing
        seed_approved_leaves(&mut doc, &[leave(7, (8, 22), (8, 23), "annual")]);
        assert_eq!(doc.entries.len(), 1);

        // seeding twice keeps one row
        let leaves = vec![leave(7, (8, 19), (8, 19), "sick")];
        seed_approved_leaves(&mut doc, &leaves);
        seed_approved_leaves(&mut doc, &leaves);
        assert_eq!(doc.entries.len(), 2);
    }
}
