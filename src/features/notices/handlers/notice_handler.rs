use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::notices::dtos::{
    CreateNoticeDto, NoticeQueryParams, NoticeResponseDto, UpdateNoticeDto,
};
use crate::features::notices::services::NoticeService;
use crate::shared::types::ApiResponse;
use crate::shared::validation::parse_id;

/// List published notices
#[utoipa::path(
    get,
    path = "/api/notices",
    tag = "notices",
    params(NoticeQueryParams),
    responses(
        (status = 200, description = "Published notices, pinned first", body = ApiResponse<Vec<NoticeResponseDto>>)
    )
)]
pub async fn list_notices(
    State(service): State<Arc<NoticeService>>,
    Query(params): Query<NoticeQueryParams>,
) -> Result<Json<ApiResponse<Vec<NoticeResponseDto>>>> {
    let (notices, total) = service.list(&params, true).await?;
    let meta = params.pagination().meta(total);
    Ok(Json(ApiResponse::success(Some(notices), None, Some(meta))))
}

/// Read a published notice (counts as a view)
#[utoipa::path(
    get,
    path = "/api/notices/{id}",
    tag = "notices",
    params(("id" = uuid::Uuid, Path, description = "Notice ID")),
    responses(
        (status = 200, description = "Notice found", body = ApiResponse<NoticeResponseDto>),
        (status = 404, description = "Notice not found or unpublished")
    )
)]
pub async fn get_notice(
    State(service): State<Arc<NoticeService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<NoticeResponseDto>>> {
    let notice = service.view_published(parse_id(&id, "Notice")?).await?;
    Ok(Json(ApiResponse::success(Some(notice), None, None)))
}

/// List all notices, drafts included
#[utoipa::path(
    get,
    path = "/api/admin/notices",
    tag = "admin",
    params(NoticeQueryParams),
    responses(
        (status = 200, description = "All notices", body = ApiResponse<Vec<NoticeResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn admin_list_notices(
    _admin: RequireAdmin,
    State(service): State<Arc<NoticeService>>,
    Query(params): Query<NoticeQueryParams>,
) -> Result<Json<ApiResponse<Vec<NoticeResponseDto>>>> {
    let (notices, total) = service.list(&params, false).await?;
    let meta = params.pagination().meta(total);
    Ok(Json(ApiResponse::success(Some(notices), None, Some(meta))))
}

/// Create a notice
#[utoipa::path(
    post,
    path = "/api/admin/notices",
    tag = "admin",
    request_body = CreateNoticeDto,
    responses(
        (status = 201, description = "Notice created", body = ApiResponse<NoticeResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_notice(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<NoticeService>>,
    AppJson(dto): AppJson<CreateNoticeDto>,
) -> Result<(StatusCode, Json<ApiResponse<NoticeResponseDto>>)> {
    let dto = dto.trimmed();
    dto.validate()?;

    let notice = service.create(dto).await?;
    tracing::debug!("Notice {} created by {}", notice.id, admin.email);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(notice), None, None)),
    ))
}

/// Update a notice; omitted fields keep their value
#[utoipa::path(
    put,
    path = "/api/admin/notices/{id}",
    tag = "admin",
    params(("id" = uuid::Uuid, Path, description = "Notice ID")),
    request_body = UpdateNoticeDto,
    responses(
        (status = 200, description = "Notice updated", body = ApiResponse<NoticeResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Notice not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_notice(
    _admin: RequireAdmin,
    State(service): State<Arc<NoticeService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateNoticeDto>,
) -> Result<Json<ApiResponse<NoticeResponseDto>>> {
    let id = parse_id(&id, "Notice")?;
    let dto = dto.trimmed();
    dto.validate()?;

    let notice = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(notice), None, None)))
}

/// Delete a notice
#[utoipa::path(
    delete,
    path = "/api/admin/notices/{id}",
    tag = "admin",
    params(("id" = uuid::Uuid, Path, description = "Notice ID")),
    responses(
        (status = 200, description = "Notice deleted"),
        (status = 404, description = "Notice not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_notice(
    _admin: RequireAdmin,
    State(service): State<Arc<NoticeService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(parse_id(&id, "Notice")?).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Notice deleted successfully".to_string()),
        None,
    )))
}
