use std::sync::Arc;

use lazy_static::lazy_static;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::config::BootstrapAdmin;
use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{AdminProfileDto, LoginRequestDto, LoginResponseDto};
use crate::features::auth::model::{Admin, AdminRole};
use crate::features::auth::password::{hash_password, verify_password};
use crate::features::auth::services::token_service::TokenService;

const ADMIN_COLUMNS: &str =
    "id, email, name, password_hash, role, last_login_at, created_at, updated_at";

lazy_static! {
    /// Verified against when the email is unknown, so both login failures cost one argon2 run
    static ref DUMMY_PASSWORD_HASH: String =
        hash_password("whitedonkey-unknown-admin").unwrap_or_default();
}

/// Check a login password against the admin's stored hash, or against the
/// dummy hash when no admin matched.
fn check_password(password: &str, hash: Option<&str>) -> Result<bool> {
    match hash {
        Some(hash) => verify_password(password, hash),
        None => {
            let _ = verify_password(password, &DUMMY_PASSWORD_HASH);
            Ok(false)
        }
    }
}

/// Service for admin login and profile lookup
pub struct AuthService {
    pool: PgPool,
    token_service: Arc<TokenService>,
}

impl AuthService {
    pub fn new(pool: PgPool, token_service: Arc<TokenService>) -> Self {
        Self {
            pool,
            token_service,
        }
    }

    /// Login with email and password.
    ///
    /// Unknown email and wrong password produce the same 401.
    pub async fn login(&self, dto: LoginRequestDto) -> Result<LoginResponseDto> {
        let email = dto.email.trim().to_lowercase();

        let admin = self.find_by_email(&email).await?;

        let hash = admin.as_ref().map(|a| a.password_hash.clone());
        let password = dto.password;
        let valid =
            tokio::task::spawn_blocking(move || check_password(&password, hash.as_deref()))
                .await
                .map_err(|e| AppError::Internal(format!("Password check panicked: {}", e)))??;

        let admin = match admin {
            Some(admin) if valid => admin,
            _ => {
                tracing::info!("Failed admin login for {}", email);
                return Err(AppError::Unauthorized(
                    "Invalid email or password".to_string(),
                ));
            }
        };

        let admin = sqlx::query_as::<_, Admin>(&format!(
            "UPDATE admins SET last_login_at = NOW() WHERE id = $1 RETURNING {}",
            ADMIN_COLUMNS
        ))
        .bind(admin.id)
        .fetch_one(&self.pool)
        .await?;

        let access_token = self.token_service.issue(&admin)?;
        tracing::info!("Admin {} logged in", admin.email);

        Ok(LoginResponseDto {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.token_service.ttl_secs(),
            admin: admin.into(),
        })
    }

    /// Profile of the admin behind the current token
    pub async fn get_profile(&self, id: Uuid) -> Result<AdminProfileDto> {
        let admin = sqlx::query_as::<_, Admin>(&format!(
            "SELECT {} FROM admins WHERE id = $1",
            ADMIN_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Admin account no longer exists".to_string()))?;

        Ok(admin.into())
    }

    /// Create the configured first admin when no account uses that email yet
    pub async fn ensure_bootstrap_admin(&self, bootstrap: &BootstrapAdmin) -> Result<()> {
        let email = bootstrap.email.trim().to_lowercase();
        if self.find_by_email(&email).await?.is_some() {
            tracing::debug!("Bootstrap admin {} already exists", email);
            return Ok(());
        }

        let password = bootstrap.password.clone();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AppError::Internal(format!("Password hashing panicked: {}", e)))??;

        let inserted = sqlx::query(
            r#"
            INSERT INTO admins (email, name, password_hash, role)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(&email)
        .bind(&bootstrap.name)
        .bind(&password_hash)
        .bind(AdminRole::SuperAdmin)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if inserted > 0 {
            tracing::info!("Created bootstrap admin {}", email);
        }

        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>(&format!(
            "SELECT {} FROM admins WHERE email = $1",
            ADMIN_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AuthConfig;
    use std::time::Duration;

    fn token_service() -> Arc<TokenService> {
        Arc::new(TokenService::new(&AuthConfig {
            jwt_secret: "a-very-long-secret-used-only-for-tests".to_string(),
            issuer: "whitedonkey-test".to_string(),
            token_ttl: Duration::from_secs(3600),
            bootstrap_admin: None,
        }))
    }

    #[test]
    fn test_unknown_admin_still_runs_password_check() {
        assert!(!verify_password("guess", &DUMMY_PASSWORD_HASH).unwrap());
        assert!(!check_password("guess", None).unwrap());
    }

    #[test]
    fn test_known_admin_password_checked() {
        let hash = hash_password("s3cret-pass").unwrap();
        assert!(check_password("s3cret-pass", Some(&hash)).unwrap());
        assert!(!check_password("other", Some(&hash)).unwrap());
    }

    fn bootstrap() -> BootstrapAdmin {
        BootstrapAdmin {
            email: "  Root@Example.com ".to_string(),
            password: "s3cret-pass".to_string(),
            name: "Root".to_string(),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_bootstrap_then_login(pool: PgPool) {
        let service = AuthService::new(pool, token_service());
        service.ensure_bootstrap_admin(&bootstrap()).await.unwrap();
        // Idempotent
        service.ensure_bootstrap_admin(&bootstrap()).await.unwrap();

        let response = service
            .login(LoginRequestDto {
                email: "root@example.com".to_string(),
                password: "s3cret-pass".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.admin.role, AdminRole::SuperAdmin);
        assert!(response.admin.last_login_at.is_some());

        let profile = service.get_profile(response.admin.id).await.unwrap();
        assert_eq!(profile.email, "root@example.com");
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_wrong_password_is_unauthorized(pool: PgPool) {
        let service = AuthService::new(pool, token_service());
        service.ensure_bootstrap_admin(&bootstrap()).await.unwrap();

        let result = service
            .login(LoginRequestDto {
                email: "root@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));

        let result = service
            .login(LoginRequestDto {
                email: "nobody@example.com".to_string(),
                password: "s3cret-pass".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }
}
