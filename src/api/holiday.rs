use actix_web::{HttpResponse, Responder, web};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};

use crate::auth::auth::AuthUser;
use crate::model::holiday::Holiday;

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct HolidayQuery {
    /// Defaults to the current year.
    #[param(example = 2026)]
    pub year: Option<i32>,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateHoliday {
    #[schema(example = "2026-12-16", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "Victory Day")]
    pub label: String,
}

/// Office holiday calendar for a year.
#[utoipa::path(
    get,
    path = "/api/holidays",
    params(HolidayQuery),
    responses(
        (status = 200, description = "Configured holidays", body = [Holiday]),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Holidays"
)]
pub async fn list_holidays(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<HolidayQuery>,
) -> actix_web::Result<impl Responder> {
    let year = query
        .year
        .unwrap_or_else(|| chrono::Utc::now().date_naive().year());

    let rows = sqlx::query_as::<_, Holiday>(
        r#"SELECT id, date, label FROM holidays WHERE YEAR(date) = ? ORDER BY date"#,
    )
    .bind(year)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, year, "Failed to fetch holidays");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(rows))
}

/// Add a holiday to the calendar (HR/Admin).
#[utoipa::path(
    post,
    path = "/api/holidays",
    request_body = CreateHoliday,
    responses(
        (status = 201, description = "Holiday created"),
        (status = 400, description = "Holiday already configured for that date"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "HR/Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Holidays"
)]
pub async fn create_holiday(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateHoliday>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let result = sqlx::query(r#"INSERT INTO holidays (date, label) VALUES (?, ?)"#)
        .bind(payload.date)
        .bind(payload.label.trim())
        .execute(pool.get_ref())
        .await;

    match result {
        Ok(_) => Ok(HttpResponse::Created().json(serde_json::json!({
            "message": "Holiday created"
        }))),
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                // Duplicate date
                if db_err.code().as_deref() == Some("23000") {
                    return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                        "message": "Holiday already configured for that date"
                    })));
                }
            }
            tracing::error!(error = %e, date = %payload.date, "Failed to create holiday");
            Err(actix_web::error::ErrorInternalServerError(
                "Internal Server Error",
            ))
        }
    }
}
