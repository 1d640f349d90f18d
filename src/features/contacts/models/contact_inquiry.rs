use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Status given to every new inquiry
pub const INQUIRY_STATUS_PENDING: &str = "PENDING";

/// Database model for a contact form submission
#[derive(Debug, Clone, FromRow)]
pub struct ContactInquiry {
    pub id: Uuid,
    pub name: String,
    /// Stored lower-cased
    pub email: String,
    pub company: Option<String>,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const CONTACT_COLUMNS: &str =
    "id, name, email, company, subject, message, status, created_at, updated_at";
