use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::attachments::dtos::AttachmentResponseDto;
use crate::features::attachments::models::{Attachment, ATTACHMENT_COLUMNS};
use crate::features::attachments::signature::{
    allowed_mime_types, is_mime_type_allowed, matches_signature, stored_filename,
};
use crate::modules::storage::LocalStorage;

/// Longest original name kept in the metadata row
const MAX_ORIGINAL_NAME_LEN: usize = 255;

/// Service for attachment upload and removal
pub struct AttachmentService {
    pool: PgPool,
    storage: Arc<LocalStorage>,
    max_file_size: usize,
}

impl AttachmentService {
    pub fn new(pool: PgPool, storage: Arc<LocalStorage>, max_file_size: usize) -> Self {
        Self {
            pool,
            storage,
            max_file_size,
        }
    }

    /// Run the upload checks in order: size ceiling, MIME allow-list, signature.
    pub fn check_upload(&self, data: &[u8], content_type: &str) -> Result<()> {
        if data.len() > self.max_file_size {
            return Err(AppError::BadRequest(format!(
                "File too large. Maximum size is {} bytes ({} MB)",
                self.max_file_size,
                self.max_file_size / 1024 / 1024
            )));
        }

        if !is_mime_type_allowed(content_type) {
            return Err(AppError::BadRequest(format!(
                "File type '{}' is not allowed. Allowed types: {}",
                content_type,
                allowed_mime_types()
            )));
        }

        if !matches_signature(content_type, data) {
            debug!("Signature mismatch for declared type {}", content_type);
            return Err(AppError::BadRequest(
                "File content does not match its declared type or the file is corrupted"
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Validate, store on disk and record an unowned attachment row
    pub async fn upload(
        &self,
        data: Vec<u8>,
        original_name: &str,
        content_type: &str,
    ) -> Result<AttachmentResponseDto> {
        self.check_upload(&data, content_type)?;

        let filename = stored_filename(original_name);
        let url = self.storage.file_url(&filename);
        let original_name: String = original_name.chars().take(MAX_ORIGINAL_NAME_LEN).collect();

        self.storage.write(&filename, &data).await?;

        let inserted = sqlx::query_as::<_, Attachment>(&format!(
            r#"
            INSERT INTO attachments (filename, original_name, size, mime_type, url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            ATTACHMENT_COLUMNS
        ))
        .bind(&filename)
        .bind(&original_name)
        .bind(data.len() as i64)
        .bind(content_type)
        .bind(&url)
        .fetch_one(&self.pool)
        .await;

        let attachment = match inserted {
            Ok(attachment) => attachment,
            Err(e) => {
                error!("Failed to record attachment {}: {:?}", filename, e);
                self.storage.delete_best_effort(&filename).await;
                return Err(e.into());
            }
        };

        info!(
            "Attachment stored: id={}, filename={}, size={}",
            attachment.id, attachment.filename, attachment.size
        );

        Ok(attachment.into())
    }

    /// Delete an unclaimed attachment: row first, then the file on disk.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let filename: Option<String> = sqlx::query_scalar(
            "DELETE FROM attachments WHERE id = $1 AND application_id IS NULL RETURNING filename",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(filename) = filename else {
            let owner: Option<Option<Uuid>> =
                sqlx::query_scalar("SELECT application_id FROM attachments WHERE id = $1")
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?;

            return Err(match owner {
                Some(_) => AppError::Conflict(
                    "Attachment is already linked to an application".to_string(),
                ),
                None => AppError::NotFound("Attachment not found".to_string()),
            });
        };

        info!("Attachment deleted: id={}, filename={}", id, filename);
        self.storage.delete_best_effort(&filename).await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::UploadConfig;
    use crate::shared::test_helpers::lazy_pool;

    const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x01, 0x02];

    fn service_with(pool: PgPool, dir: &std::path::Path, max: usize) -> AttachmentService {
        let storage = Arc::new(LocalStorage::new(&UploadConfig {
            upload_dir: dir.to_path_buf(),
            max_file_size: max,
            public_path: "/uploads".to_string(),
        }));
        AttachmentService::new(pool, storage, max)
    }

    fn lazy_service(max: usize) -> AttachmentService {
        let pool = lazy_pool();
        service_with(pool, std::path::Path::new("/nonexistent"), max)
    }

    #[tokio::test]
    async fn test_size_checked_before_signature() {
        let service = lazy_service(4);
        // Declared png with non-png bytes, but too big: size wins
        let err = service.check_upload(b"not a png", "image/png").unwrap_err();
        match err {
            AppError::BadRequest(msg) => assert!(msg.starts_with("File too large")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_mime_checked_before_signature() {
        let err = lazy_service(1024)
            .check_upload(PNG, "image/gif")
            .unwrap_err();
        match err {
            AppError::BadRequest(msg) => assert!(msg.contains("is not allowed")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_declared_png_with_wrong_bytes_rejected() {
        let err = lazy_service(1024)
            .check_upload(b"GIF89a-not-png", "image/png")
            .unwrap_err();
        match err {
            AppError::BadRequest(msg) => assert!(msg.contains("does not match")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_valid_png_passes_checks() {
        assert!(lazy_service(1024).check_upload(PNG, "image/png").is_ok());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_upload_then_delete(pool: PgPool) {
        let dir = tempfile::tempdir().unwrap();
        let service = service_with(pool, dir.path(), 1024);

        let uploaded = service
            .upload(PNG.to_vec(), "logo.png", "image/png")
            .await
            .unwrap();
        assert_eq!(uploaded.original_name, "logo.png");
        assert_eq!(uploaded.size, PNG.len() as i64);
        assert_eq!(uploaded.url, format!("/uploads/{}", uploaded.filename));
        assert!(dir.path().join(&uploaded.filename).exists());

        service.delete(uploaded.id).await.unwrap();
        assert!(!dir.path().join(&uploaded.filename).exists());

        assert!(matches!(
            service.delete(uploaded.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
