use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Admin role enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "admin_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminRole {
    SuperAdmin,
    Admin,
    Moderator,
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdminRole::SuperAdmin => write!(f, "SUPER_ADMIN"),
            AdminRole::Admin => write!(f, "ADMIN"),
            AdminRole::Moderator => write!(f, "MODERATOR"),
        }
    }
}

/// Database model for an admin account
#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: AdminRole,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin identity decoded from a valid access token
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedAdmin {
    pub id: Uuid,
    pub email: String,
    pub role: AdminRole,
}

impl AuthenticatedAdmin {
    /// Every admin role may manage site content and applications
    pub fn has_admin_access(&self) -> bool {
        matches!(
            self.role,
            AdminRole::SuperAdmin | AdminRole::Admin | AdminRole::Moderator
        )
    }
}

/// JWT claims carried by admin access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    pub sub: String,
    pub email: String,
    pub role: AdminRole,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}
