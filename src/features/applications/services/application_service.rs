use sqlx::PgPool;
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::database::is_unique_violation;
use crate::core::error::{AppError, Result};
use crate::features::applications::dtos::{
    ApplicationCreatedDto, ApplicationLookupDto, NewApplication,
};
use crate::features::applications::models::ApplicationStatus;
use crate::features::applications::tracking_code;
use crate::features::attachments::models::{Attachment, ATTACHMENT_COLUMNS};

/// Attachments grouped by owning application, each list in upload order
pub async fn load_attachments(
    pool: &PgPool,
    application_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<Attachment>>> {
    if application_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = sqlx::query_as::<_, Attachment>(&format!(
        r#"
        SELECT {}
        FROM attachments
        WHERE application_id = ANY($1)
        ORDER BY created_at ASC, id ASC
        "#,
        ATTACHMENT_COLUMNS
    ))
    .bind(application_ids)
    .fetch_all(pool)
    .await?;

    let mut grouped: HashMap<Uuid, Vec<Attachment>> = HashMap::new();
    for row in rows {
        if let Some(owner) = row.application_id {
            grouped.entry(owner).or_default().push(row);
        }
    }
    Ok(grouped)
}

#[derive(sqlx::FromRow)]
struct LookupRow {
    id: Uuid,
    tracking_code: String,
    company_name: String,
    contact_name: String,
    project_title: String,
    status: ApplicationStatus,
    created_at: chrono::DateTime<chrono::Utc>,
}

/// Service for public application intake and lookup
pub struct ApplicationService {
    pool: PgPool,
}

impl ApplicationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert the application and claim its attachments in one transaction.
    ///
    /// The claim only matches rows with no owner, so an attachment that is
    /// missing or already linked makes the whole submission roll back.
    pub async fn create(&self, app: NewApplication) -> Result<ApplicationCreatedDto> {
        let code = tracking_code::generate();
        let mut tx = self.pool.begin().await?;

        let application_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO applications (
                tracking_code, company_name, contact_name, contact_email, contact_phone,
                project_title, project_type, budget_range, timeline, description,
                ai_requirements, blockchain_needs, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id
            "#,
        )
        .bind(&code)
        .bind(&app.company_name)
        .bind(&app.contact_name)
        .bind(&app.contact_email)
        .bind(&app.contact_phone)
        .bind(&app.project_title)
        .bind(app.project_type)
        .bind(app.budget_range)
        .bind(&app.timeline)
        .bind(&app.description)
        .bind(&app.ai_requirements)
        .bind(&app.blockchain_needs)
        .bind(ApplicationStatus::Pending)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict(
                    "A tracking code collision occurred. Please submit again.".to_string(),
                )
            } else {
                AppError::Database(e)
            }
        })?;

        if !app.attachment_ids.is_empty() {
            let claimed = sqlx::query(
                r#"
                UPDATE attachments
                SET application_id = $1
                WHERE id = ANY($2) AND application_id IS NULL
                "#,
            )
            .bind(application_id)
            .bind(&app.attachment_ids)
            .execute(&mut *tx)
            .await?
            .rows_affected();

            if claimed != app.attachment_ids.len() as u64 {
                debug!(
                    "Attachment claim mismatch: requested={}, claimed={}",
                    app.attachment_ids.len(),
                    claimed
                );
                tx.rollback().await?;
                return Err(AppError::BadRequest(
                    "Some attachments were not found or are already linked to another application"
                        .to_string(),
                ));
            }
        }

        tx.commit().await?;

        info!(
            "Application created: tracking_code={}, attachments={}",
            code,
            app.attachment_ids.len()
        );

        Ok(ApplicationCreatedDto {
            tracking_code: code,
            message: "Your application has been submitted successfully.".to_string(),
        })
    }

    /// Redacted view of an application for the public status page
    pub async fn find_by_tracking_code(&self, code: &str) -> Result<ApplicationLookupDto> {
        let code = tracking_code::normalize(code);

        let row = sqlx::query_as::<_, LookupRow>(
            r#"
            SELECT id, tracking_code, company_name, contact_name, project_title, status, created_at
            FROM applications
            WHERE tracking_code = $1
            "#,
        )
        .bind(&code)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

        let attachments = load_attachments(&self.pool, &[row.id])
            .await?
            .remove(&row.id)
            .unwrap_or_default();

        Ok(ApplicationLookupDto {
            tracking_code: row.tracking_code,
            company_name: row.company_name,
            contact_name: row.contact_name,
            project_title: row.project_title,
            status: row.status,
            created_at: row.created_at,
            attachments: attachments.into_iter().map(Into::into).collect(),
        })
    }
}
