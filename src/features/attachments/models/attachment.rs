use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for an uploaded attachment
#[derive(Debug, Clone, FromRow)]
pub struct Attachment {
    pub id: Uuid,
    /// Name on disk, `<stem>_<uuid><ext>`
    pub filename: String,
    pub original_name: String,
    pub size: i64,
    pub mime_type: String,
    pub url: String,
    /// Set once, when an application claims the upload
    pub application_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

pub const ATTACHMENT_COLUMNS: &str =
    "id, filename, original_name, size, mime_type, url, application_id, created_at";
