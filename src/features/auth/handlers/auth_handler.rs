use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{AdminProfileDto, LoginRequestDto, LoginResponseDto};
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::services::AuthService;
use crate::shared::types::ApiResponse;
use axum::{extract::State, Json};
use std::sync::Arc;
use validator::Validate;

/// Login with admin email and password
#[utoipa::path(
    post,
    path = "/api/admin/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "admin-auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<ApiResponse<LoginResponseDto>>> {
    dto.validate()?;

    let response = service.login(dto).await?;
    Ok(Json(ApiResponse::success(Some(response), None, None)))
}

/// Get the currently authenticated admin
#[utoipa::path(
    get,
    path = "/api/admin/auth/me",
    responses(
        (status = 200, description = "Current admin retrieved successfully", body = ApiResponse<AdminProfileDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin-auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<AuthService>>,
) -> Result<Json<ApiResponse<AdminProfileDto>>> {
    let profile = service.get_profile(admin.id).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}
