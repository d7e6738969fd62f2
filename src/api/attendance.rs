use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};

use crate::auth::auth::AuthUser;
use crate::model::attendance::AttendanceRow;

/// Check-in endpoint: opens a new badge session for today. Several sessions
/// per day are allowed, but not two open ones.
#[utoipa::path(
    post,
    path = "/api/attendance/check-in",
    responses(
        (status = 200, description = "Checked in successfully", body = Object, example = json!({
            "message": "Checked in successfully"
        })),
        (status = 400, description = "An open session already exists", body = Object, example = json!({
            "message": "Already checked in"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn check_in(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee()?;

    let open: Option<(u64,)> = sqlx::query_as(
        r#"
        SELECT id FROM attendance
        WHERE employee_id = ? AND date = CURDATE() AND check_out IS NULL
        LIMIT 1
        "#,
    )
    .bind(employee_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, employee_id, "Check-in lookup failed");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    if open.is_some() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Already checked in"
        })));
    }

    sqlx::query(
        r#"
        INSERT INTO attendance (employee_id, date, check_in)
        VALUES (?, CURDATE(), CURTIME())
        "#,
    )
    .bind(employee_id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, employee_id, "Check-in failed");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Checked in successfully"
    })))
}

/// Check-out endpoint: closes today's open badge session.
#[utoipa::path(
    put,
    path = "/api/attendance/check-out",
    responses(
        (status = 200, description = "Checked out successfully", body = Object, example = json!({
            "message": "Checked out successfully"
        })),
        (status = 400, description = "No open session found for today", body = Object, example = json!({
            "message": "No open session found for today"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn check_out(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee()?;

    let result = sqlx::query(
        r#"
        UPDATE attendance
        SET check_out = CURTIME()
        WHERE employee_id = ?
        AND date = CURDATE()
        AND check_out IS NULL
        ORDER BY check_in DESC
        LIMIT 1
        "#,
    )
    .bind(employee_id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, employee_id, "Check-out failed");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "No open session found for today"
        })));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Checked out successfully"
    })))
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct AttendanceRange {
    #[param(example = "2026-08-17")]
    #[schema(example = "2026-08-17", value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[param(example = "2026-08-23")]
    #[schema(example = "2026-08-23", value_type = String, format = "date")]
    pub end_date: NaiveDate,
}

/// Raw badge sessions for a date range, oldest first.
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceRange),
    responses(
        (status = 200, description = "Badge sessions in range", body = [AttendanceRow]),
        (status = 400, description = "start_date after end_date"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn list_attendance(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<AttendanceRange>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee()?;

    if query.start_date > query.end_date {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "start_date cannot be after end_date"
        })));
    }

    let rows = sqlx::query_as::<_, AttendanceRow>(
        r#"
        SELECT id, employee_id, date, check_in, check_out
        FROM attendance
        WHERE employee_id = ? AND date BETWEEN ? AND ?
        ORDER BY date, check_in
        "#,
    )
    .bind(employee_id)
    .bind(query.start_date)
    .bind(query.end_date)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, employee_id, "Failed to fetch attendance");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(rows))
}
