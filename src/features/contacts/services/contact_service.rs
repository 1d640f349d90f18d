use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::contacts::dtos::{ContactCreatedDto, ContactInquiryDto, CreateContactDto};
use crate::features::contacts::models::{ContactInquiry, CONTACT_COLUMNS, INQUIRY_STATUS_PENDING};
use crate::shared::types::PaginationQuery;

/// Service for contact inquiries
pub struct ContactService {
    pool: PgPool,
}

impl ContactService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a normalized, validated inquiry
    pub async fn create(&self, dto: CreateContactDto) -> Result<ContactCreatedDto> {
        let inquiry_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO contact_inquiries (name, email, company, subject, message, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&dto.company)
        .bind(&dto.subject)
        .bind(&dto.message)
        .bind(INQUIRY_STATUS_PENDING)
        .fetch_one(&self.pool)
        .await?;

        info!("Contact inquiry received: id={}", inquiry_id);
        Ok(ContactCreatedDto { inquiry_id })
    }

    /// Newest first
    pub async fn list(&self, pagination: &PaginationQuery) -> Result<(Vec<ContactInquiryDto>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contact_inquiries")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, ContactInquiry>(&format!(
            "SELECT {} FROM contact_inquiries ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            CONTACT_COLUMNS
        ))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    pub async fn get(&self, id: Uuid) -> Result<ContactInquiryDto> {
        let inquiry = sqlx::query_as::<_, ContactInquiry>(&format!(
            "SELECT {} FROM contact_inquiries WHERE id = $1",
            CONTACT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Contact inquiry not found".to_string()))?;

        Ok(inquiry.into())
    }
}
