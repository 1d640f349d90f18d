use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::admin::dtos::*;
use crate::features::admin::export;
use crate::features::admin::services::AdminService;
use crate::features::auth::guards::RequireAdmin;
use crate::shared::types::ApiResponse;

/// Aggregate counts for the admin landing page
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses(
        (status = 200, description = "Dashboard counts", body = ApiResponse<DashboardDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_dashboard(
    _admin: RequireAdmin,
    State(service): State<Arc<AdminService>>,
) -> Result<Json<ApiResponse<DashboardDto>>> {
    let dashboard = service.dashboard().await?;
    Ok(Json(ApiResponse::success(Some(dashboard), None, None)))
}

/// List applications with attachments (filtered, paginated)
#[utoipa::path(
    get,
    path = "/api/admin/applications",
    params(AdminApplicationQuery),
    responses(
        (status = 200, description = "List of applications", body = ApiResponse<Vec<AdminApplicationDto>>),
        (status = 400, description = "Invalid filter"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_applications(
    _admin: RequireAdmin,
    State(service): State<Arc<AdminService>>,
    Query(params): Query<AdminApplicationQuery>,
) -> Result<Json<ApiResponse<Vec<AdminApplicationDto>>>> {
    let filter = params.filter()?;
    let (items, total) = service
        .list_applications(&filter, params.offset(), params.limit())
        .await?;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(params.meta(total)),
    )))
}

/// Download filtered applications as an xlsx workbook
#[utoipa::path(
    get,
    path = "/api/admin/applications/export",
    params(ExportQuery),
    responses(
        (status = 200, description = "xlsx workbook download"),
        (status = 400, description = "Invalid filter"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn export_applications(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    Query(params): Query<ExportQuery>,
) -> Result<impl IntoResponse> {
    let filter = params.filter()?;
    let applications = service.export_applications(&filter).await?;
    let workbook = export::build_workbook(&applications)?;

    tracing::info!(
        "Applications exported: rows={}, admin={}",
        applications.len(),
        admin.email
    );

    Ok((
        [
            (header::CONTENT_TYPE, export::XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                export::content_disposition(Utc::now().date_naive()),
            ),
        ],
        workbook,
    ))
}

/// Get one application by tracking code
#[utoipa::path(
    get,
    path = "/api/admin/applications/{tracking_code}",
    params(("tracking_code" = String, Path, description = "Tracking code")),
    responses(
        (status = 200, description = "Application", body = ApiResponse<AdminApplicationDto>),
        (status = 404, description = "Not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn admin_get_application(
    _admin: RequireAdmin,
    State(service): State<Arc<AdminService>>,
    Path(tracking_code): Path<String>,
) -> Result<Json<ApiResponse<AdminApplicationDto>>> {
    let application = service.get_application(&tracking_code).await?;
    Ok(Json(ApiResponse::success(Some(application), None, None)))
}

/// Overwrite an application's status
#[utoipa::path(
    patch,
    path = "/api/admin/applications/{tracking_code}/status",
    params(("tracking_code" = String, Path, description = "Tracking code")),
    request_body = UpdateStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<AdminApplicationDto>),
        (status = 400, description = "Invalid status"),
        (status = 404, description = "Not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_application_status(
    _admin: RequireAdmin,
    State(service): State<Arc<AdminService>>,
    Path(tracking_code): Path<String>,
    AppJson(dto): AppJson<UpdateStatusDto>,
) -> Result<Json<ApiResponse<AdminApplicationDto>>> {
    dto.validate()?;
    let status = dto.parse_status()?;

    let application = service.update_status(&tracking_code, status).await?;
    Ok(Json(ApiResponse::success(
        Some(application),
        Some("Status updated".to_string()),
        None,
    )))
}
