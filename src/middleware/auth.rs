use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::config::Config;
use crate::db::models::admin::AdminAccount;
use crate::utils::error::AppError;

/// JWT payload: `sub` is the admin's username, `exp` a unix timestamp.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// The authenticated admin, inserted into request extensions by
/// [`require_admin`] for handlers that need to know who is acting.
#[derive(Debug, Clone)]
pub struct CurrentAdmin(pub AdminAccount);

/// Gate for back-office routes. Verifies the bearer token, then re-resolves
/// the account on every request so a deactivated or deleted admin is locked
/// out immediately, stale token or not.
pub async fn require_admin(
    State(pool): State<SqlitePool>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Missing authorization token".into()))?;

    let config = Config::get();
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Invalid or expired token, please log in again".into()))?
    .claims;

    let admin = sqlx::query_as::<_, AdminAccount>(
        "SELECT * FROM admins WHERE username = ? AND is_active = 1",
    )
    .bind(&claims.sub)
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| {
        AppError::Unauthorized("Account is disabled or removed, please log in again".into())
    })?;

    req.extensions_mut().insert(CurrentAdmin(admin));
    Ok(next.run(req).await)
}
