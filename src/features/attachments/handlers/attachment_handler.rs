use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::AppError;
use crate::features::attachments::dtos::{
    AttachmentResponseDto, DeleteAttachmentResponseDto, UploadAttachmentDto,
};
use crate::features::attachments::services::AttachmentService;
use crate::shared::types::ApiResponse;
use crate::shared::validation::parse_id;

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge("Uploaded file exceeds the size limit".to_string());
    }
    debug!("Failed to read multipart data: {}", e);
    AppError::BadRequest(format!("Failed to read multipart data: {}", e))
}

/// Upload an attachment
///
/// Accepts multipart/form-data with a single `file` part. The stored
/// attachment has no owner until an application references it.
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "attachments",
    request_body(
        content = UploadAttachmentDto,
        content_type = "multipart/form-data",
    ),
    responses(
        (status = 201, description = "File uploaded successfully", body = ApiResponse<AttachmentResponseDto>),
        (status = 400, description = "Missing file, too large, disallowed type or signature mismatch"),
        (status = 413, description = "Request body too large")
    )
)]
pub async fn upload_attachment(
    State(service): State<Arc<AttachmentService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<AttachmentResponseDto>>), AppError> {
    let mut upload: Option<(Vec<u8>, String, String)> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            debug!("Ignoring unknown field: {:?}", field.name());
            continue;
        }
        if upload.is_some() {
            return Err(AppError::BadRequest(
                "Only one file may be uploaded per request".to_string(),
            ));
        }

        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unnamed".to_string());
        let data = field.bytes().await.map_err(multipart_error)?;

        upload = Some((data.to_vec(), file_name, content_type));
    }

    let (data, file_name, content_type) =
        upload.ok_or_else(|| AppError::BadRequest("No file was provided".to_string()))?;

    let response = service.upload(data, &file_name, &content_type).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(response), None, None)),
    ))
}

/// Delete an attachment that no application has claimed yet
#[utoipa::path(
    delete,
    path = "/api/upload/{id}",
    tag = "attachments",
    params(
        ("id" = Uuid, Path, description = "Attachment ID")
    ),
    responses(
        (status = 200, description = "Attachment deleted", body = ApiResponse<DeleteAttachmentResponseDto>),
        (status = 404, description = "Attachment not found"),
        (status = 409, description = "Attachment already linked to an application")
    )
)]
pub async fn delete_attachment(
    State(service): State<Arc<AttachmentService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeleteAttachmentResponseDto>>, AppError> {
    let id = parse_id(&id, "Attachment")?;

    service.delete(id).await?;

    Ok(Json(ApiResponse::success(
        Some(DeleteAttachmentResponseDto { deleted: true }),
        Some("Attachment deleted successfully".to_string()),
        None,
    )))
}
