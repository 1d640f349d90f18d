use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::core::error::{AppError, Result};
use crate::features::applications::models::{ApplicationStatus, BudgetRange, ProjectType};
use crate::features::attachments::dtos::AttachmentResponseDto;
use crate::shared::validation::{trim_opt, BUDGET_RANGE_REGEX, PHONE_REGEX, PROJECT_TYPE_REGEX};

/// Application form submission.
///
/// Every field is optional at the serde layer so that missing fields are
/// reported per field by validation instead of failing deserialization.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationDto {
    #[validate(
        required(message = "Company name is required"),
        length(min = 1, max = 100, message = "Company name must be 1-100 characters")
    )]
    #[schema(example = "Acme Corp")]
    pub company_name: Option<String>,

    #[validate(
        required(message = "Contact name is required"),
        length(min = 1, max = 50, message = "Contact name must be 1-50 characters")
    )]
    pub contact_name: Option<String>,

    #[validate(
        required(message = "Email is required"),
        email(message = "Invalid email format"),
        length(max = 100, message = "Email must not exceed 100 characters")
    )]
    pub contact_email: Option<String>,

    #[validate(
        required(message = "Phone number is required"),
        regex(
            path = *PHONE_REGEX,
            message = "Phone number may contain only digits, spaces, '-', '+' and parentheses"
        ),
        length(max = 20, message = "Phone number must not exceed 20 characters")
    )]
    #[schema(example = "010-1234-5678")]
    pub contact_phone: Option<String>,

    #[validate(
        required(message = "Project title is required"),
        length(min = 1, max = 200, message = "Project title must be 1-200 characters")
    )]
    pub project_title: Option<String>,

    #[validate(
        required(message = "Project type is required"),
        regex(path = *PROJECT_TYPE_REGEX, message = "Invalid project type")
    )]
    #[schema(example = "youtube")]
    pub project_type: Option<String>,

    #[validate(
        required(message = "Budget range is required"),
        regex(path = *BUDGET_RANGE_REGEX, message = "Invalid budget range")
    )]
    #[schema(example = "range_10m_50m")]
    pub budget_range: Option<String>,

    #[validate(
        required(message = "Timeline is required"),
        length(min = 1, max = 100, message = "Timeline must be 1-100 characters")
    )]
    pub timeline: Option<String>,

    #[validate(
        required(message = "Description is required"),
        length(min = 10, max = 5000, message = "Description must be 10-5000 characters")
    )]
    pub description: Option<String>,

    /// Current marketing situation
    #[validate(
        required(message = "Current marketing status is required"),
        length(min = 10, max = 2000, message = "Current marketing status must be 10-2000 characters")
    )]
    pub ai_requirements: Option<String>,

    /// Goals and challenges
    #[validate(
        required(message = "Goals and challenges are required"),
        length(min = 10, max = 2000, message = "Goals and challenges must be 10-2000 characters")
    )]
    pub blockchain_needs: Option<String>,

    /// IDs returned by `POST /api/upload`
    #[serde(default)]
    #[validate(
        length(max = 5, message = "At most 5 attachments are allowed"),
        custom(function = "validate_attachment_ids")
    )]
    pub attachment_ids: Vec<String>,
}

fn validate_attachment_ids(ids: &[String]) -> std::result::Result<(), ValidationError> {
    if ids.iter().all(|id| Uuid::parse_str(id.trim()).is_ok()) {
        Ok(())
    } else {
        Err(ValidationError::new("attachment_id")
            .with_message("Each attachment id must be a valid UUID".into()))
    }
}

/// Submission after trimming, validation and typing
#[derive(Debug, Clone)]
pub struct NewApplication {
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
    /// Distinct, in submission order
    pub attachment_ids: Vec<Uuid>,
}

impl CreateApplicationDto {
    /// Trim every text field so that length rules see the submitted content
    pub fn trimmed(self) -> Self {
        Self {
            company_name: trim_opt(self.company_name),
            contact_name: trim_opt(self.contact_name),
            contact_email: trim_opt(self.contact_email),
            contact_phone: trim_opt(self.contact_phone),
            project_title: trim_opt(self.project_title),
            project_type: trim_opt(self.project_type),
            budget_range: trim_opt(self.budget_range),
            timeline: trim_opt(self.timeline),
            description: trim_opt(self.description),
            ai_requirements: trim_opt(self.ai_requirements),
            blockchain_needs: trim_opt(self.blockchain_needs),
            attachment_ids: self
                .attachment_ids
                .into_iter()
                .map(|id| id.trim().to_string())
                .collect(),
        }
    }

    /// Trim, validate all fields at once, and convert into a typed submission
    pub fn into_new_application(self) -> Result<NewApplication> {
        let dto = self.trimmed();
        dto.validate()?;

        let required = |value: Option<String>, field: &str| {
            value.ok_or_else(|| AppError::Validation(format!("{} is required", field)))
        };

        let mut attachment_ids: Vec<Uuid> = Vec::with_capacity(dto.attachment_ids.len());
        for raw in &dto.attachment_ids {
            let id = Uuid::parse_str(raw)
                .map_err(|_| AppError::Validation("Invalid attachment id".to_string()))?;
            if !attachment_ids.contains(&id) {
                attachment_ids.push(id);
            }
        }

        Ok(NewApplication {
            project_type: required(dto.project_type, "projectType")?
                .parse()
                .map_err(AppError::Validation)?,
            budget_range: required(dto.budget_range, "budgetRange")?
                .parse()
                .map_err(AppError::Validation)?,
            company_name: required(dto.company_name, "companyName")?,
            contact_name: required(dto.contact_name, "contactName")?,
            contact_email: required(dto.contact_email, "contactEmail")?,
            contact_phone: required(dto.contact_phone, "contactPhone")?,
            project_title: required(dto.project_title, "projectTitle")?,
            timeline: required(dto.timeline, "timeline")?,
            description: required(dto.description, "description")?,
            ai_requirements: required(dto.ai_requirements, "aiRequirements")?,
            blockchain_needs: required(dto.blockchain_needs, "blockchainNeeds")?,
            attachment_ids,
        })
    }
}

/// Response DTO for a newly created application
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationCreatedDto {
    #[schema(example = "WD-LOYW3V28-7K2QZ")]
    pub tracking_code: String,
    pub message: String,
}

/// Public view of an application, without contact details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationLookupDto {
    pub tracking_code: String,
    pub company_name: String,
    pub contact_name: String,
    pub project_title: String,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub attachments: Vec<AttachmentResponseDto>,
}

/// `GET /api/applications?id=...`
#[derive(Debug, Deserialize, IntoParams)]
pub struct TrackingCodeQuery {
    /// Tracking code
    pub id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::field_errors;
    use fake::faker::company::en::CompanyName;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;

    fn valid_dto() -> CreateApplicationDto {
        CreateApplicationDto {
            company_name: Some(CompanyName().fake::<String>().chars().take(100).collect()),
            contact_name: Some(Name().fake::<String>().chars().take(50).collect()),
            contact_email: Some(SafeEmail().fake()),
            contact_phone: Some("010-1234-5678".to_string()),
            project_title: Some("Online retail".to_string()),
            project_type: Some("youtube".to_string()),
            budget_range: Some("range_10m_50m".to_string()),
            timeline: Some("Within a month".to_string()),
            description: Some("We sell handmade furniture online.".to_string()),
            ai_requirements: Some("Instagram only, posted by hand.".to_string()),
            blockchain_needs: Some("Grow traffic and accept stablecoins.".to_string()),
            attachment_ids: vec![],
        }
    }

    #[test]
    fn test_valid_payload_converts() {
        let app = valid_dto().into_new_application().unwrap();
        assert_eq!(app.project_type, ProjectType::Youtube);
        assert_eq!(app.budget_range, BudgetRange::Range10m50m);
        assert!(app.attachment_ids.is_empty());
    }

    #[test]
    fn test_missing_field_is_reported_by_wire_name() {
        let dto = CreateApplicationDto {
            company_name: None,
            ..valid_dto()
        };
        let errors = field_errors(&dto.validate().unwrap_err());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["companyName"], "Company name is required");
    }

    #[test]
    fn test_all_violations_reported_together() {
        let dto = CreateApplicationDto {
            contact_email: Some("not-an-email".to_string()),
            contact_phone: Some("call me maybe".to_string()),
            project_type: Some("tiktok".to_string()),
            description: Some("short".to_string()),
            ..valid_dto()
        };
        let errors = field_errors(&dto.validate().unwrap_err());
        assert!(errors.contains_key("contactEmail"));
        assert!(errors.contains_key("contactPhone"));
        assert!(errors.contains_key("projectType"));
        assert!(errors.contains_key("description"));
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_whitespace_only_name_fails_after_trim() {
        let dto = CreateApplicationDto {
            contact_name: Some("   ".to_string()),
            ..valid_dto()
        };
        match dto.into_new_application() {
            Err(AppError::FieldValidation(fields)) => {
                assert!(fields.contains_key("contactName"))
            }
            other => panic!("expected field validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_attachment_ids_limits() {
        let too_many = CreateApplicationDto {
            attachment_ids: (0..6).map(|_| Uuid::new_v4().to_string()).collect(),
            ..valid_dto()
        };
        let errors = field_errors(&too_many.validate().unwrap_err());
        assert_eq!(errors["attachmentIds"], "At most 5 attachments are allowed");

        let malformed = CreateApplicationDto {
            attachment_ids: vec!["123".to_string()],
            ..valid_dto()
        };
        let errors = field_errors(&malformed.validate().unwrap_err());
        assert_eq!(
            errors["attachmentIds"],
            "Each attachment id must be a valid UUID"
        );
    }

    #[test]
    fn test_duplicate_attachment_ids_collapse() {
        let id = Uuid::new_v4();
        let dto = CreateApplicationDto {
            attachment_ids: vec![id.to_string(), format!(" {} ", id)],
            ..valid_dto()
        };
        assert_eq!(dto.into_new_application().unwrap().attachment_ids, vec![id]);
    }

    #[test]
    fn test_missing_fields_deserialize_to_field_errors() {
        let dto: CreateApplicationDto = serde_json::from_str("{}").unwrap();
        let errors = field_errors(&dto.validate().unwrap_err());
        assert_eq!(errors.len(), 11);
        assert!(!errors.contains_key("attachmentIds"));
    }
}
