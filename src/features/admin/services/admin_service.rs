use sqlx::PgPool;
use tracing::info;

use crate::core::error::{AppError, Result};
use crate::features::admin::dtos::*;
use crate::features::applications::models::{Application, ApplicationStatus, APPLICATION_COLUMNS};
use crate::features::applications::services::load_attachments;
use crate::features::applications::tracking_code;
use crate::features::contacts::models::INQUIRY_STATUS_PENDING;

const RECENT_APPLICATIONS: i64 = 5;

const FILTER_CLAUSE: &str = r#"
    WHERE ($1::application_status IS NULL OR status = $1)
      AND ($2::project_type IS NULL OR project_type = $2)
      AND ($3::TEXT IS NULL
           OR company_name ILIKE $3
           OR contact_name ILIKE $3
           OR contact_email ILIKE $3
           OR tracking_code ILIKE $3)
"#;

/// Service for admin queries over applications
pub struct AdminService {
    pool: PgPool,
}

impl AdminService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // APPLICATIONS
    // =========================================================================

    /// Filtered page of applications, newest first
    pub async fn list_applications(
        &self,
        filter: &ApplicationFilter,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<AdminApplicationDto>, i64)> {
        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM applications {}",
            FILTER_CLAUSE
        ))
        .bind(filter.status)
        .bind(filter.project_type)
        .bind(&filter.search)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, Application>(&format!(
            "SELECT {} FROM applications {} ORDER BY created_at DESC LIMIT $4 OFFSET $5",
            APPLICATION_COLUMNS, FILTER_CLAUSE
        ))
        .bind(filter.status)
        .bind(filter.project_type)
        .bind(&filter.search)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((self.with_attachments(rows).await?, total))
    }

    /// Every application matching the filter, newest first
    pub async fn export_applications(
        &self,
        filter: &ApplicationFilter,
    ) -> Result<Vec<AdminApplicationDto>> {
        let rows = sqlx::query_as::<_, Application>(&format!(
            "SELECT {} FROM applications {} ORDER BY created_at DESC",
            APPLICATION_COLUMNS, FILTER_CLAUSE
        ))
        .bind(filter.status)
        .bind(filter.project_type)
        .bind(&filter.search)
        .fetch_all(&self.pool)
        .await?;

        self.with_attachments(rows).await
    }

    pub async fn get_application(&self, code: &str) -> Result<AdminApplicationDto> {
        let app = sqlx::query_as::<_, Application>(&format!(
            "SELECT {} FROM applications WHERE tracking_code = $1",
            APPLICATION_COLUMNS
        ))
        .bind(tracking_code::normalize(code))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(application_not_found)?;

        self.with_attachments(vec![app])
            .await?
            .pop()
            .ok_or_else(application_not_found)
    }

    /// Overwrite the status; any status may follow any other
    pub async fn update_status(
        &self,
        code: &str,
        status: ApplicationStatus,
    ) -> Result<AdminApplicationDto> {
        let app = sqlx::query_as::<_, Application>(&format!(
            r#"
            UPDATE applications
            SET status = $2, updated_at = NOW()
            WHERE tracking_code = $1
            RETURNING {}
            "#,
            APPLICATION_COLUMNS
        ))
        .bind(tracking_code::normalize(code))
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(application_not_found)?;

        info!(
            "Application status updated: tracking_code={}, status={}",
            app.tracking_code, status
        );

        self.with_attachments(vec![app])
            .await?
            .pop()
            .ok_or_else(application_not_found)
    }

    async fn with_attachments(&self, rows: Vec<Application>) -> Result<Vec<AdminApplicationDto>> {
        let ids: Vec<_> = rows.iter().map(|a| a.id).collect();
        let mut attachments = load_attachments(&self.pool, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|app| {
                let files = attachments.remove(&app.id).unwrap_or_default();
                AdminApplicationDto::from_parts(app, files)
            })
            .collect())
    }

    // =========================================================================
    // DASHBOARD
    // =========================================================================

    pub async fn dashboard(&self) -> Result<DashboardDto> {
        let applications = sqlx::query_as::<_, ApplicationCountsDto>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'PENDING') AS pending,
                COUNT(*) FILTER (WHERE status = 'REVIEWING') AS reviewing,
                COUNT(*) FILTER (WHERE status = 'APPROVED') AS approved,
                COUNT(*) FILTER (WHERE status = 'REJECTED') AS rejected
            FROM applications
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let total_notices: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notices")
            .fetch_one(&self.pool)
            .await?;

        let (total_contacts, pending_contacts): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE status = $1) FROM contact_inquiries",
        )
        .bind(INQUIRY_STATUS_PENDING)
        .fetch_one(&self.pool)
        .await?;

        let recent = sqlx::query_as::<_, Application>(&format!(
            "SELECT {} FROM applications ORDER BY created_at DESC LIMIT $1",
            APPLICATION_COLUMNS
        ))
        .bind(RECENT_APPLICATIONS)
        .fetch_all(&self.pool)
        .await?;

        Ok(DashboardDto {
            applications,
            total_notices,
            total_contacts,
            pending_contacts,
            recent_applications: recent.into_iter().map(Into::into).collect(),
        })
    }
}

fn application_not_found() -> AppError {
    AppError::NotFound("Application not found".to_string())
}
