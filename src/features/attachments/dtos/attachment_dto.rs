use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::attachments::models::Attachment;

/// Upload request for OpenAPI documentation
/// Note: the handler reads axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadAttachmentDto {
    /// The file to upload (jpeg, png, webp, pdf, doc, docx)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}

/// Attachment metadata returned after upload and inside application views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentResponseDto {
    pub id: Uuid,
    pub filename: String,
    pub original_name: String,
    pub size: i64,
    pub mime_type: String,
    pub url: String,
}

impl From<Attachment> for AttachmentResponseDto {
    fn from(a: Attachment) -> Self {
        Self {
            id: a.id,
            filename: a.filename,
            original_name: a.original_name,
            size: a.size,
            mime_type: a.mime_type,
            url: a.url,
        }
    }
}

/// Response DTO for delete operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteAttachmentResponseDto {
    pub deleted: bool,
}
