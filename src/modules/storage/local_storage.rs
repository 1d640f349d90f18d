//! Local disk storage for uploaded attachments
//!
//! Files are written flat into the configured upload directory and served
//! back under the public path prefix (e.g. `/uploads/{filename}`).

use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::core::config::UploadConfig;
use crate::core::error::AppError;

/// Disk-backed store for attachment bytes
pub struct LocalStorage {
    base_path: PathBuf,
    public_path: String,
}

impl LocalStorage {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            base_path: config.upload_dir.clone(),
            public_path: config.public_path.clone(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Create the upload directory if it does not exist yet
    pub async fn ensure_dir_exists(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.base_path).await.map_err(|e| {
            AppError::Internal(format!(
                "Failed to create upload directory {}: {}",
                self.base_path.display(),
                e
            ))
        })?;
        info!("Upload directory ready: {}", self.base_path.display());
        Ok(())
    }

    /// Public URL under which a stored file is served
    pub fn file_url(&self, filename: &str) -> String {
        format!("{}/{}", self.public_path, filename)
    }

    /// Write a file atomically (temp file + rename)
    pub async fn write(&self, filename: &str, data: &[u8]) -> Result<(), AppError> {
        let full_path = self.base_path.join(filename);
        let temp_path = self.base_path.join(format!(".{}.tmp", filename));
        debug!(path = %full_path.display(), size = data.len(), "storage: write");

        let result = async {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(data).await?;
            file.sync_all().await?;
            fs::rename(&temp_path, &full_path).await
        }
        .await;

        if let Err(e) = result {
            let _ = fs::remove_file(&temp_path).await;
            return Err(AppError::Internal(format!(
                "Failed to write file {}: {}",
                full_path.display(),
                e
            )));
        }

        Ok(())
    }

    /// Remove a stored file, logging instead of failing when it cannot be removed
    pub async fn delete_best_effort(&self, filename: &str) {
        let full_path = self.base_path.join(filename);
        match fs::remove_file(&full_path).await {
            Ok(()) => debug!(path = %full_path.display(), "storage: deleted"),
            Err(e) => warn!(
                path = %full_path.display(),
                error = %e,
                "storage: failed to delete file"
            ),
        }
    }
}
