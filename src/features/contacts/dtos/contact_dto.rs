use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::contacts::models::ContactInquiry;
use crate::shared::validation::trim_opt;

/// Contact form submission
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactDto {
    #[validate(
        required(message = "Name is required"),
        length(min = 1, max = 100, message = "Name must be 1-100 characters")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Email is required"),
        email(message = "Invalid email format"),
        length(max = 255, message = "Email must not exceed 255 characters")
    )]
    pub email: Option<String>,

    #[validate(length(max = 100, message = "Company must not exceed 100 characters"))]
    pub company: Option<String>,

    #[validate(
        required(message = "Subject is required"),
        length(min = 1, max = 200, message = "Subject must be 1-200 characters")
    )]
    pub subject: Option<String>,

    #[validate(
        required(message = "Message is required"),
        length(min = 1, max = 5000, message = "Message must be 1-5000 characters")
    )]
    pub message: Option<String>,
}

impl CreateContactDto {
    /// Trim all fields, lower-case the e-mail and drop a blank company
    pub fn normalized(self) -> Self {
        Self {
            name: trim_opt(self.name),
            email: trim_opt(self.email).map(|e| e.to_lowercase()),
            company: trim_opt(self.company).filter(|c| !c.is_empty()),
            subject: trim_opt(self.subject),
            message: trim_opt(self.message),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactCreatedDto {
    pub inquiry_id: Uuid,
}

/// Contact inquiry as shown to admins
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactInquiryDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ContactInquiry> for ContactInquiryDto {
    fn from(c: ContactInquiry) -> Self {
        Self {
            id: c.id,
            name: c.name,
            email: c.email,
            company: c.company,
            subject: c.subject,
            message: c.message,
            status: c.status,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized() {
        let dto = CreateContactDto {
            name: Some("  Lee ".to_string()),
            email: Some(" Lee@Example.COM ".to_string()),
            company: Some("   ".to_string()),
            subject: Some(" Hi ".to_string()),
            message: Some(" Hello there ".to_string()),
        }
        .normalized();

        assert_eq!(dto.name.as_deref(), Some("Lee"));
        assert_eq!(dto.email.as_deref(), Some("lee@example.com"));
        assert!(dto.company.is_none());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_blank_required_fields_rejected() {
        let dto = CreateContactDto {
            name: Some("   ".to_string()),
            email: Some("x@example.com".to_string()),
            company: None,
            subject: None,
            message: Some("hi".to_string()),
        }
        .normalized();

        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("subject"));
        assert!(!fields.contains_key("company"));
    }
}
