use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
pub enum AdminRole {
    #[serde(rename = "admin")]
    #[sqlx(rename = "admin")]
    Admin,
    #[serde(rename = "super-admin")]
    #[sqlx(rename = "super-admin")]
    SuperAdmin,
}

/// Credential holder for the back office. The password hash never leaves
/// the server.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminAccount {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: AdminRole,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public projection of an admin account, returned by auth endpoints.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminInfo {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub name: String,
    pub role: AdminRole,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<&AdminAccount> for AdminInfo {
    fn from(admin: &AdminAccount) -> Self {
        AdminInfo {
            id: admin.id,
            username: admin.username.clone(),
            email: admin.email.clone(),
            name: admin.name.clone(),
            role: admin.role,
            last_login: admin.last_login,
        }
    }
}

/// Bootstrap request creating a new admin account.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAdminRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 1))]
    pub name: String,
    pub role: Option<AdminRole>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login/registration response: the signed credential plus the
/// account it belongs to.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub admin: AdminInfo,
}
