use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};

use crate::auth::auth::AuthUser;
use crate::engine::grid;
use crate::model::project_allocation::ProjectAllocation;

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct AllocationQuery {
    /// Any date inside the wanted week.
    #[param(example = "2026-08-17")]
    #[schema(example = "2026-08-17", value_type = String, format = "date")]
    pub week_start: NaiveDate,
}

/// Projects the employee is allocated to during the requested week; the
/// timesheet's project dropdown is restricted to these.
#[utoipa::path(
    get,
    path = "/api/projects/allocated",
    params(AllocationQuery),
    responses(
        (status = 200, description = "Allocated projects", body = [ProjectAllocation]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Projects"
)]
pub async fn allocated_projects(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<AllocationQuery>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee()?;

    let (week_start, week_end) = grid::week_bounds(query.week_start);

    let rows = sqlx::query_as::<_, ProjectAllocation>(
        r#"
        SELECT p.name, p.code, a.start_date, a.end_date
        FROM project_allocations a
        JOIN projects p ON p.id = a.project_id
        WHERE a.employee_id = ? AND a.start_date <= ? AND a.end_date >= ?
        ORDER BY p.name
        "#,
    )
    .bind(employee_id)
    .bind(week_end)
    .bind(week_start)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, employee_id, "Failed to fetch allocations");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(rows))
}
