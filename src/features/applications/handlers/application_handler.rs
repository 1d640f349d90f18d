use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::applications::dtos::{
    ApplicationCreatedDto, ApplicationLookupDto, CreateApplicationDto, TrackingCodeQuery,
};
use crate::features::applications::services::ApplicationService;
use crate::shared::types::ApiResponse;

/// Submit a new application
#[utoipa::path(
    post,
    path = "/api/applications",
    tag = "applications",
    request_body = CreateApplicationDto,
    responses(
        (status = 201, description = "Application submitted", body = ApiResponse<ApplicationCreatedDto>),
        (status = 400, description = "Invalid fields (see `details`) or unusable attachments"),
        (status = 409, description = "Tracking code collision"),
        (status = 503, description = "Database unavailable")
    )
)]
pub async fn create_application(
    State(service): State<Arc<ApplicationService>>,
    AppJson(dto): AppJson<CreateApplicationDto>,
) -> Result<(StatusCode, Json<ApiResponse<ApplicationCreatedDto>>)> {
    let application = dto.into_new_application()?;
    let created = service.create(application).await?;
    let message = created.message.clone();

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(created), Some(message), None)),
    ))
}

/// Look up an application by tracking code
#[utoipa::path(
    get,
    path = "/api/applications/{tracking_code}",
    tag = "applications",
    params(
        ("tracking_code" = String, Path, description = "Tracking code, e.g. WD-LOYW3V28-7K2QZ")
    ),
    responses(
        (status = 200, description = "Application found", body = ApiResponse<ApplicationLookupDto>),
        (status = 404, description = "Application not found")
    )
)]
pub async fn get_application(
    State(service): State<Arc<ApplicationService>>,
    Path(tracking_code): Path<String>,
) -> Result<Json<ApiResponse<ApplicationLookupDto>>> {
    let application = service.find_by_tracking_code(&tracking_code).await?;
    Ok(Json(ApiResponse::success(Some(application), None, None)))
}

/// Look up an application by tracking code passed as `?id=`
#[utoipa::path(
    get,
    path = "/api/applications",
    tag = "applications",
    params(TrackingCodeQuery),
    responses(
        (status = 200, description = "Application found", body = ApiResponse<ApplicationLookupDto>),
        (status = 400, description = "Tracking code missing"),
        (status = 404, description = "Application not found")
    )
)]
pub async fn find_application(
    State(service): State<Arc<ApplicationService>>,
    Query(query): Query<TrackingCodeQuery>,
) -> Result<Json<ApiResponse<ApplicationLookupDto>>> {
    let code = query
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Tracking code is required".to_string()))?;

    let application = service.find_by_tracking_code(&code).await?;
    Ok(Json(ApiResponse::success(Some(application), None, None)))
}
