//! Authorization guards for admin routes.
//!
//! The auth middleware decodes the bearer token and stores an
//! [`AuthenticatedAdmin`] in the request extensions; these guards read it back
//! and check the role.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedAdmin;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for any signed-in admin.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(admin): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedAdmin);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let admin = parts
            .extensions
            .get::<AuthenticatedAdmin>()
            .ok_or_else(|| AppError::Unauthorized("Admin not authenticated".to_string()))?;

        if !admin.has_admin_access() {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(RequireAdmin(admin.clone()))
    }
}
