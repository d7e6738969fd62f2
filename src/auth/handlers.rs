use crate::{
    auth::{
        auth::AuthUser,
        jwt::{generate_access_token, generate_refresh_token, verify_token},
        password::{hash_password, verify_password},
    },
    config::Config,
    models::{LoginReq, RefreshReq, RegisterReq, TokenType},
    model::user::User,
};
use actix_web::{HttpResponse, Responder, get, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{debug, error, info, instrument};

#[derive(Serialize, Deserialize)]
struct LoginResponse {
    access_token: String,
    refresh_token: String,
}

/// User registration handler. Accounts start unlinked; HR ties them to an
/// employee profile afterwards.
pub async fn register(user: web::Json<RegisterReq>, pool: web::Data<MySqlPool>) -> impl Responder {
    let username = user.username.trim().to_lowercase();
    let password = &user.password;

    if username.is_empty() || password.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "error": "Username and password must not be empty"
        }));
    }

    let hashed = match hash_password(password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Password hashing failed");
            return HttpResponse::InternalServerError().json(json!({
                "error": "Failed to register user"
            }));
        }
    };

    let result = sqlx::query(r#"INSERT INTO users (username, password, role_id) VALUES (?, ?, ?)"#)
        .bind(&username)
        .bind(&hashed)
        .bind(user.role_id)
        .execute(pool.get_ref())
        .await;

    match result {
        Ok(_) => HttpResponse::Created().json(json!({
            "message": "User registered successfully"
        })),
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23000") {
                    return HttpResponse::Conflict().json(json!({
                        "error": "Username already exists"
                    }));
                }
            }
            error!(error = %e, "Failed to register user");
            HttpResponse::InternalServerError().json(json!({
                "error": "Failed to register user"
            }))
        }
    }
}

#[instrument(
    name = "auth_login",
    skip(pool, config, user),
    fields(username = %user.username)
)]
pub async fn login(
    user: web::Json<LoginReq>,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> impl Responder {
    info!("Login request received");

    if user.username.trim().is_empty() || user.password.is_empty() {
        info!("Validation failed: empty username or password");
        return HttpResponse::BadRequest().body("Username or password required");
    }

    debug!("Fetching user from database");

    let db_user = match sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password, role_id, employee_id
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(user.username.trim().to_lowercase())
    .fetch_optional(pool.get_ref())
    .await
    {
        Ok(Some(u)) => u,
        Ok(None) => {
            info!("Invalid credentials: user not found");
            return HttpResponse::Unauthorized().body("Invalid credentials");
        }
        Err(e) => {
            error!(error = %e, "Database error while fetching user");
            return HttpResponse::InternalServerError().finish();
        }
    };

    if verify_password(&user.password, &db_user.password).is_err() {
        info!("Invalid credentials: password mismatch");
        return HttpResponse::Unauthorized().body("Invalid credentials");
    }

    let issued = generate_access_token(
        db_user.id,
        db_user.username.clone(),
        db_user.role_id,
        db_user.employee_id,
        &config.jwt_secret,
        config.access_token_ttl,
    )
    .and_then(|access| {
        generate_refresh_token(
            db_user.id,
            db_user.username.clone(),
            db_user.role_id,
            db_user.employee_id,
            &config.jwt_secret,
            config.refresh_token_ttl,
        )
        .map(|refresh| (access, refresh))
    });

    match issued {
        Ok((access_token, refresh_token)) => {
            info!(user_id = db_user.id, "Login successful");
            HttpResponse::Ok().json(LoginResponse {
                access_token,
                refresh_token,
            })
        }
        Err(e) => {
            error!(error = %e, "Token generation failed");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub async fn refresh_token(
    body: web::Json<RefreshReq>,
    config: web::Data<Config>,
) -> impl Responder {
    let claims = match verify_token(&body.refresh_token, &config.jwt_secret) {
        Ok(c) => c,
        Err(e) => {
            return HttpResponse::Unauthorized().json(json!({
                "error": "Invalid or expired refresh token",
                "details": e
            }));
        }
    };

    if claims.token_type != TokenType::Refresh {
        return HttpResponse::Unauthorized().json(json!({
            "error": "Not a refresh token"
        }));
    }

    match generate_access_token(
        claims.user_id,
        claims.sub,
        claims.role,
        claims.employee_id,
        &config.jwt_secret,
        config.access_token_ttl,
    ) {
        Ok(access_token) => HttpResponse::Ok().json(json!({ "access_token": access_token })),
        Err(e) => {
            error!(error = %e, "Token generation failed");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Stateless logout: the client discards its tokens; nothing to revoke
/// server-side.
pub async fn logout() -> impl Responder {
    HttpResponse::Ok().json(json!({ "message": "Logged out" }))
}

/// Who-am-I endpoint behind the auth middleware.
#[get("/me")]
pub async fn me(auth: AuthUser) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "user_id": auth.user_id,
        "username": auth.username,
        "employee_id": auth.employee_id,
    }))
}
