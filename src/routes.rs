use crate::{
    api::{attendance, holiday, project, timesheet},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let login_limiter = Arc::new(build_limiter(config.rate_login_per_min));
    let register_limiter = Arc::new(build_limiter(config.rate_register_per_min));
    let refresh_limiter = Arc::new(build_limiter(config.rate_refresh_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // Public routes
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/login")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::login)),
            )
            .service(
                web::resource("/register")
                    .wrap(register_limiter.clone())
                    .route(web::post().to(handlers::register)),
            )
            .service(
                web::resource("/refresh")
                    .wrap(refresh_limiter.clone())
                    .route(web::post().to(handlers::refresh_token)),
            )
            .service(
                web::resource("/logout")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::logout)),
            ),
    );

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware)) // authentication
            .wrap(protected_limiter.clone()) // rate limiting
            .service(handlers::me)
            .service(
                web::scope("/timesheet")
                    // /timesheet?week_start=...
                    .service(web::resource("").route(web::get().to(timesheet::get_timesheet)))
                    // /timesheet/edit — stateless reducer round-trip
                    .service(
                        web::resource("/edit").route(web::post().to(timesheet::validate_edit)),
                    )
                    // /timesheet/draft
                    .service(web::resource("/draft").route(web::post().to(timesheet::save_draft)))
                    // /timesheet/submit
                    .service(
                        web::resource("/submit")
                            .route(web::post().to(timesheet::submit_timesheet)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(
                        web::resource("")
                            .route(web::get().to(attendance::list_attendance))
                            .route(web::post().to(attendance::check_in))
                            .route(web::put().to(attendance::check_out)),
                    )
                    // /attendance/check-in, /attendance/check-out
                    .service(
                        web::resource("/check-in").route(web::post().to(attendance::check_in)),
                    )
                    .service(
                        web::resource("/check-out").route(web::put().to(attendance::check_out)),
                    ),
            )
            .service(
                web::scope("/projects")
                    // /projects/allocated?week_start=...
                    .service(
                        web::resource("/allocated")
                            .route(web::get().to(project::allocated_projects)),
                    ),
            )
            .service(
                web::scope("/holidays")
                    // /holidays
                    .service(
                        web::resource("")
                            .route(web::get().to(holiday::list_holidays))
                            .route(web::post().to(holiday::create_holiday)),
                    ),
            ),
    );
}


// LOGIN
//  ├─ access_token (15 min)
//  └─ refresh_token (7 days)
//
// TIMESHEET WEEK
//  └─ GET /api/timesheet?week_start=YYYY-MM-DD
//       ├─ persisted draft  ─┐
//       └─ attendance punches ┴─ reconciled on-premises envelope
//
// EVERY CELL EDIT
//  └─ POST /api/timesheet/edit  → accepted value / clamp / rejection
//
// SAVE
//  ├─ POST /api/timesheet/draft   (repeatable)
//  └─ POST /api/timesheet/submit  (terminal for the employee)
