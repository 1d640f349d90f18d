use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::{Admin, AdminClaims, AuthenticatedAdmin};

/// Audience embedded in every admin token
const ADMIN_AUDIENCE: &str = "whitedonkey-admin";

/// Issues and validates HS256 admin access tokens
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.issuer.clone(),
            ttl_secs: config.token_ttl.as_secs() as i64,
        }
    }

    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Sign an access token for the given admin
    pub fn issue(&self, admin: &Admin) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = AdminClaims {
            sub: admin.id.to_string(),
            email: admin.email.clone(),
            role: admin.role,
            iss: self.issuer.clone(),
            aud: ADMIN_AUDIENCE.to_string(),
            iat: now,
            exp: now + self.ttl_secs,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign admin token: {}", e)))
    }

    /// Verify signature, issuer, audience and expiry, returning the admin identity
    pub fn validate(&self, token: &str) -> Result<AuthenticatedAdmin> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[ADMIN_AUDIENCE]);
        validation.leeway = 30;

        let data = decode::<AdminClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!("Admin token rejected: {}", e);
            AppError::Auth("Invalid or expired token".to_string())
        })?;

        let id = Uuid::parse_str(&data.claims.sub)
            .map_err(|_| AppError::Auth("Invalid token subject".to_string()))?;

        Ok(AuthenticatedAdmin {
            id,
            email: data.claims.email,
            role: data.claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::AdminRole;
    use std::time::Duration;

    fn config(secret: &str, ttl: u64) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            issuer: "whitedonkey-test".to_string(),
            token_ttl: Duration::from_secs(ttl),
            bootstrap_admin: None,
        }
    }

    fn admin() -> Admin {
        Admin {
            id: Uuid::new_v4(),
            email: "admin@example.com".to_string(),
            name: "Admin".to_string(),
            password_hash: String::new(),
            role: AdminRole::Admin,
            last_login_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_issue_then_validate() {
        let service = TokenService::new(&config("a-very-long-secret-used-only-for-tests", 3600));
        let admin = admin();

        let token = service.issue(&admin).unwrap();
        let decoded = service.validate(&token).unwrap();

        assert_eq!(decoded.id, admin.id);
        assert_eq!(decoded.email, admin.email);
        assert_eq!(decoded.role, AdminRole::Admin);
    }

    #[test]
    fn test_rejects_token_signed_with_other_secret() {
        let issuer = TokenService::new(&config("a-very-long-secret-used-only-for-tests", 3600));
        let other = TokenService::new(&config("another-secret-that-is-also-long-enough", 3600));

        let token = issuer.issue(&admin()).unwrap();
        assert!(matches!(other.validate(&token), Err(AppError::Auth(_))));
    }

    #[test]
    fn test_rejects_expired_token() {
        let service = TokenService::new(&config("a-very-long-secret-used-only-for-tests", 3600));
        let admin = admin();
        let now = Utc::now().timestamp();
        let claims = AdminClaims {
            sub: admin.id.to_string(),
            email: admin.email.clone(),
            role: admin.role,
            iss: "whitedonkey-test".to_string(),
            aud: ADMIN_AUDIENCE.to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"a-very-long-secret-used-only-for-tests"),
        )
        .unwrap();

        assert!(service.validate(&token).is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        let service = TokenService::new(&config("a-very-long-secret-used-only-for-tests", 3600));
        assert!(service.validate("not-a-jwt").is_err());
    }
}
