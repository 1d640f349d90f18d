use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::core::database::is_connectivity_error;
use crate::shared::types::ApiResponse;
use crate::shared::validation::FieldErrors;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Field-scoped validation failures, all reported at once
    #[error("Validation failed for {} field(s)", .0.len())]
    FieldValidation(FieldErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors, details) = match self {
            AppError::Database(ref e) if is_connectivity_error(e) => {
                tracing::error!("Database unavailable: {:?}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Database is temporarily unavailable. Please try again shortly.".to_string(),
                    None,
                    None,
                )
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                    None,
                    None,
                )
            }
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.clone(), None, None),
            AppError::Validation(ref msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                Some(vec![msg.clone()]),
                None,
            ),
            AppError::FieldValidation(fields) => {
                tracing::debug!("Rejected payload, invalid fields: {:?}", fields.keys());
                (
                    StatusCode::BAD_REQUEST,
                    "The submitted data is invalid.".to_string(),
                    Some(fields.values().cloned().collect()),
                    Some(fields),
                )
            }
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None, None),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                    None,
                )
            }
            AppError::Auth(ref msg) => (StatusCode::UNAUTHORIZED, msg.clone(), None, None),
            AppError::Unauthorized(ref msg) => (StatusCode::UNAUTHORIZED, msg.clone(), None, None),
            AppError::Forbidden(ref msg) => (StatusCode::FORBIDDEN, msg.clone(), None, None),
            AppError::Conflict(ref msg) => (StatusCode::CONFLICT, msg.clone(), None, None),
            AppError::PayloadTooLarge(ref msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, msg.clone(), None, None)
            }
        };

        let body = Json(ApiResponse::<()>::error_with_details(
            Some(message),
            errors,
            details,
        ));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use std::collections::BTreeMap;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_field_validation_renders_detail_map() {
        let mut fields = BTreeMap::new();
        fields.insert("companyName".to_string(), "Company name is required".to_string());
        fields.insert("contactEmail".to_string(), "Invalid email".to_string());

        let response = AppError::FieldValidation(fields).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["details"]["companyName"], "Company name is required");
        assert_eq!(json["details"]["contactEmail"], "Invalid email");
        assert_eq!(json["errors"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_pool_timeout_maps_to_service_unavailable() {
        let response = AppError::Database(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_other_database_errors_are_generic() {
        let response = AppError::Database(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["message"], "Database error occurred");
        assert!(json["details"].is_null());
    }

    #[tokio::test]
    async fn test_conflict_status() {
        let response = AppError::Conflict("dup".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
