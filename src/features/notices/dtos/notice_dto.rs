use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::notices::models::Notice;
use crate::shared::constants::DEFAULT_PAGE_SIZE;
use crate::shared::types::PaginationQuery;
use crate::shared::validation::{like_pattern, trim_opt};

/// Request DTO for creating a notice
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoticeDto {
    #[validate(
        required(message = "Title is required"),
        length(min = 1, max = 200, message = "Title must be 1-200 characters")
    )]
    pub title: Option<String>,

    #[validate(
        required(message = "Content is required"),
        length(min = 1, max = 20000, message = "Content must be 1-20000 characters")
    )]
    pub content: Option<String>,

    #[serde(default)]
    pub is_pinned: bool,

    #[serde(default = "default_published")]
    pub is_published: bool,
}

fn default_published() -> bool {
    true
}

impl CreateNoticeDto {
    pub fn trimmed(self) -> Self {
        Self {
            title: trim_opt(self.title),
            content: trim_opt(self.content),
            ..self
        }
    }
}

/// Request DTO for updating a notice; absent fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoticeDto {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 20000, message = "Content must be 1-20000 characters"))]
    pub content: Option<String>,

    pub is_pinned: Option<bool>,

    pub is_published: Option<bool>,
}

impl UpdateNoticeDto {
    pub fn trimmed(self) -> Self {
        Self {
            title: trim_opt(self.title),
            content: trim_opt(self.content),
            ..self
        }
    }
}

/// Notice as returned by both public and admin endpoints
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoticeResponseDto {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub is_pinned: bool,
    pub is_published: bool,
    pub view_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Notice> for NoticeResponseDto {
    fn from(n: Notice) -> Self {
        Self {
            id: n.id,
            title: n.title,
            content: n.content,
            is_pinned: n.is_pinned,
            is_published: n.is_published,
            view_count: n.view_count,
            created_at: n.created_at,
            updated_at: n.updated_at,
        }
    }
}

/// Query parameters for notice listings
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct NoticeQueryParams {
    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Items per page (default: 20, max: 100)
    #[serde(default = "default_limit")]
    #[param(minimum = 1, maximum = 100)]
    pub limit: i64,

    /// Case-insensitive match on title or content
    pub search: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl NoticeQueryParams {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            limit: self.limit,
        }
    }

    /// Search term as an ILIKE pattern, `None` when blank
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_deref().and_then(like_pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_defaults() {
        let dto: CreateNoticeDto =
            serde_json::from_str(r#"{"title":"Hello","content":"World"}"#).unwrap();
        assert!(!dto.is_pinned);
        assert!(dto.is_published);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_blank_title_rejected_after_trim() {
        let dto: CreateNoticeDto =
            serde_json::from_str(r#"{"title":"   ","content":"World"}"#).unwrap();
        assert!(dto.trimmed().validate().is_err());
    }

    #[test]
    fn test_update_allows_partial_payload() {
        let dto: UpdateNoticeDto = serde_json::from_str(r#"{"isPinned":true}"#).unwrap();
        assert!(dto.validate().is_ok());
        assert_eq!(dto.is_pinned, Some(true));
        assert!(dto.title.is_none());
    }

    #[test]
    fn test_search_pattern() {
        let q = NoticeQueryParams {
            page: 1,
            limit: 20,
            search: Some("  launch ".to_string()),
        };
        assert_eq!(q.search_pattern().as_deref(), Some("%launch%"));

        let q = NoticeQueryParams {
            search: Some("v1_2".to_string()),
            ..q
        };
        assert_eq!(q.search_pattern().as_deref(), Some(r"%v1\_2%"));

        let q = NoticeQueryParams {
            search: Some("   ".to_string()),
            ..q
        };
        assert!(q.search_pattern().is_none());
    }
}
