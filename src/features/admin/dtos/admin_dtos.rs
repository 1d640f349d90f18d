use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::applications::models::{
    Application, ApplicationStatus, BudgetRange, ProjectType,
};
use crate::features::attachments::dtos::AttachmentResponseDto;
use crate::features::attachments::models::Attachment;
use crate::shared::constants::{ADMIN_DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::shared::types::Meta;
use crate::shared::validation::like_pattern;

// =============================================================================
// FILTERS
// =============================================================================

/// Parsed application filters shared by the list and export endpoints
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationFilter {
    pub status: Option<ApplicationStatus>,
    pub project_type: Option<ProjectType>,
    /// ILIKE pattern
    pub search: Option<String>,
}

impl ApplicationFilter {
    fn parse(status: Option<&str>, project_type: Option<&str>, search: Option<&str>) -> Result<Self> {
        Ok(Self {
            status: parse_choice(status)?,
            project_type: parse_choice(project_type)?,
            search: search.and_then(like_pattern),
        })
    }
}

/// Blank and `all` mean "no filter"
fn parse_choice<T: FromStr<Err = String>>(raw: Option<&str>) -> Result<Option<T>> {
    match raw.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(AppError::BadRequest),
    }
}

/// Query params for the admin application list
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct AdminApplicationQuery {
    /// PENDING, REVIEWING, APPROVED, REJECTED or `all`
    pub status: Option<String>,
    /// Service type or `all`
    pub project_type: Option<String>,
    /// Matches company, contact name, e-mail and tracking code
    pub search: Option<String>,
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    #[serde(default = "default_limit")]
    #[param(minimum = 1, maximum = 100)]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    ADMIN_DEFAULT_PAGE_SIZE
}

impl AdminApplicationQuery {
    pub fn filter(&self) -> Result<ApplicationFilter> {
        ApplicationFilter::parse(
            self.status.as_deref(),
            self.project_type.as_deref(),
            self.search.as_deref(),
        )
    }

    pub fn limit(&self) -> i64 {
        self.limit.clamp(1, MAX_PAGE_SIZE)
    }

    pub fn page(&self) -> i64 {
        self.page.max(1)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }

    pub fn meta(&self, total: i64) -> Meta {
        Meta::paginated(total, self.page(), self.limit())
    }
}

/// Query params for the spreadsheet export
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ExportQuery {
    pub status: Option<String>,
    pub project_type: Option<String>,
    pub search: Option<String>,
}

impl ExportQuery {
    pub fn filter(&self) -> Result<ApplicationFilter> {
        ApplicationFilter::parse(
            self.status.as_deref(),
            self.project_type.as_deref(),
            self.search.as_deref(),
        )
    }
}

// =============================================================================
// APPLICATION DTOs
// =============================================================================

/// Full application record as seen by admins
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminApplicationDto {
    pub id: Uuid,
    pub tracking_code: String,
    pub company_name: String,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub project_title: String,
    pub project_type: ProjectType,
    pub budget_range: BudgetRange,
    pub timeline: String,
    pub description: String,
    pub ai_requirements: String,
    pub blockchain_needs: String,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub attachments: Vec<AttachmentResponseDto>,
}

impl AdminApplicationDto {
    pub fn from_parts(app: Application, attachments: Vec<Attachment>) -> Self {
        Self {
            id: app.id,
            tracking_code: app.tracking_code,
            company_name: app.company_name,
            contact_name: app.contact_name,
            contact_email: app.contact_email,
            contact_phone: app.contact_phone,
            project_title: app.project_title,
            project_type: app.project_type,
            budget_range: app.budget_range,
            timeline: app.timeline,
            description: app.description,
            ai_requirements: app.ai_requirements,
            blockchain_needs: app.blockchain_needs,
            status: app.status,
            created_at: app.created_at,
            updated_at: app.updated_at,
            attachments: attachments.into_iter().map(Into::into).collect(),
        }
    }
}

/// Status overwrite request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStatusDto {
    #[validate(required(message = "Status is required"))]
    #[schema(value_type = String, example = "REVIEWING")]
    pub status: Option<String>,
}

impl UpdateStatusDto {
    pub fn parse_status(&self) -> Result<ApplicationStatus> {
        self.status
            .as_deref()
            .unwrap_or_default()
            .trim()
            .parse()
            .map_err(AppError::BadRequest)
    }
}

// =============================================================================
// DASHBOARD DTOs
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationCountsDto {
    pub total: i64,
    pub pending: i64,
    pub reviewing: i64,
    pub approved: i64,
    pub rejected: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentApplicationDto {
    pub tracking_code: String,
    pub company_name: String,
    pub contact_name: String,
    pub project_type: ProjectType,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Application> for RecentApplicationDto {
    fn from(app: Application) -> Self {
        Self {
            tracking_code: app.tracking_code,
            company_name: app.company_name,
            contact_name: app.contact_name,
            project_type: app.project_type,
            status: app.status,
            created_at: app.created_at,
        }
    }
}

/// Counts for the admin landing page
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDto {
    pub applications: ApplicationCountsDto,
    pub total_notices: i64,
    pub total_contacts: i64,
    pub pending_contacts: i64,
    pub recent_applications: Vec<RecentApplicationDto>,
}
