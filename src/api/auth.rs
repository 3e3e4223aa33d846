use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use sqlx::SqlitePool;
use tracing::info;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use validator::Validate;

use crate::config::Config;
use crate::db::models::admin::{
    AdminAccount, AdminInfo, AdminRole, LoginRequest, LoginResponse, RegisterAdminRequest,
};
use crate::middleware::auth::{Claims, CurrentAdmin};
use crate::utils::api_response::ApiResponse;
use crate::utils::error::AppError;

const TOKEN_VALIDITY_DAYS: i64 = 7;

pub fn auth_routes() -> Router<SqlitePool> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub fn secure_auth_routes() -> Router<SqlitePool> {
    Router::new()
        .route("/auth/profile", get(profile))
        .route("/auth/verify", get(verify_token))
}

#[derive(OpenApi)]
#[openapi(
    paths(register, login, profile, verify_token),
    components(schemas(RegisterAdminRequest, LoginRequest, LoginResponse, AdminInfo)),
    modifiers(&SecurityAddon),
    tags((name = "Auth", description = "Admin authentication"))
)]
pub struct AuthDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
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

fn issue_token(username: &str) -> Result<String, AppError> {
    let config = Config::get();
    let exp = (Utc::now() + chrono::Duration::days(TOKEN_VALIDITY_DAYS)).timestamp() as usize;
    let claims = Claims {
        sub: username.to_string(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )?;
    Ok(token)
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterAdminRequest,
    responses(
        (status = 201, description = "Admin account created", body = LoginResponse),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Username or email already taken")
    )
)]
pub async fn register(
    State(pool): State<SqlitePool>,
    Json(payload): Json<RegisterAdminRequest>,
) -> Result<ApiResponse<LoginResponse>, AppError> {
    payload.validate()?;

    let password_hash = hash(&payload.password, DEFAULT_COST)?;
    let now = Utc::now();
    sqlx::query(
        "INSERT INTO admins (username, email, name, password_hash, role, is_active, \
         created_at, updated_at) VALUES (?, ?, ?, ?, ?, 1, ?, ?)",
    )
    .bind(&payload.username)
    .bind(payload.email.to_lowercase())
    .bind(&payload.name)
    .bind(&password_hash)
    .bind(payload.role.unwrap_or(AdminRole::Admin))
    .bind(now)
    .bind(now)
    .execute(&pool)
    .await?;

    let admin = fetch_admin(&pool, &payload.username).await?;
    let token = issue_token(&admin.username)?;
    info!(username = %admin.username, "admin account created");
    Ok(ApiResponse::success(
        StatusCode::CREATED,
        "Admin registered successfully",
        LoginResponse {
            token,
            admin: AdminInfo::from(&admin),
        },
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Bad credentials or inactive account")
    )
)]
pub async fn login(
    State(pool): State<SqlitePool>,
    Json(payload): Json<LoginRequest>,
) -> Result<ApiResponse<LoginResponse>, AppError> {
    let admin = sqlx::query_as::<_, AdminAccount>("SELECT * FROM admins WHERE username = ?")
        .bind(&payload.username)
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid username or password".into()))?;

    if !verify(&payload.password, &admin.password_hash)? {
        return Err(AppError::Unauthorized("Invalid username or password".into()));
    }
    if !admin.is_active {
        return Err(AppError::Unauthorized("Account is disabled".into()));
    }

    let now = Utc::now();
    sqlx::query("UPDATE admins SET last_login = ?, updated_at = ? WHERE id = ?")
        .bind(now)
        .bind(now)
        .bind(admin.id)
        .execute(&pool)
        .await?;

    let admin = fetch_admin(&pool, &payload.username).await?;
    let token = issue_token(&admin.username)?;
    info!(username = %admin.username, "admin logged in");
    Ok(ApiResponse::success(
        StatusCode::OK,
        "Login successful",
        LoginResponse {
            token,
            admin: AdminInfo::from(&admin),
        },
    ))
}

#[utoipa::path(
    get,
    path = "/api/auth/profile",
    tag = "Auth",
    responses(
        (status = 200, description = "Profile of the authenticated admin", body = AdminInfo),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearerAuth" = []))
)]
pub async fn profile(
    Extension(CurrentAdmin(admin)): Extension<CurrentAdmin>,
) -> Result<ApiResponse<AdminInfo>, AppError> {
    Ok(ApiResponse::success(
        StatusCode::OK,
        "Profile retrieved successfully",
        AdminInfo::from(&admin),
    ))
}

#[utoipa::path(
    get,
    path = "/api/auth/verify",
    tag = "Auth",
    responses(
        (status = 200, description = "Token is valid", body = AdminInfo),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearerAuth" = []))
)]
pub async fn verify_token(
    Extension(CurrentAdmin(admin)): Extension<CurrentAdmin>,
) -> Result<ApiResponse<AdminInfo>, AppError> {
    Ok(ApiResponse::success(
        StatusCode::OK,
        "Token is valid",
        AdminInfo::from(&admin),
    ))
}

async fn fetch_admin(pool: &SqlitePool, username: &str) -> Result<AdminAccount, AppError> {
    sqlx::query_as::<_, AdminAccount>("SELECT * FROM admins WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound("Admin"))
}
