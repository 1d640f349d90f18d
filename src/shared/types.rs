use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
    /// Field name -> message, present only for field validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub pages: i64,
}

impl Meta {
    pub fn paginated(total: i64, page: i64, limit: i64) -> Self {
        let limit = limit.max(1);
        Self {
            total,
            page,
            limit,
            pages: (total + limit - 1) / limit,
        }
    }
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Standard pagination query parameters for list endpoints.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PaginationQuery {
    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Number of items per page (default: 20, max: 100)
    #[serde(default = "default_limit")]
    #[param(minimum = 1, maximum = 100)]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationQuery {
    /// Calculate SQL OFFSET from page number
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }

    /// Get clamped limit (respects MAX_PAGE_SIZE)
    pub fn limit(&self) -> i64 {
        self.limit.clamp(1, MAX_PAGE_SIZE)
    }

    pub fn page(&self) -> i64 {
        self.page.max(1)
    }

    pub fn meta(&self, total: i64) -> Meta {
        Meta::paginated(total, self.page(), self.limit())
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
            details: None,
        }
    }

    pub fn error_with_details(
        message: Option<String>,
        errors: Option<Vec<String>>,
        details: Option<BTreeMap<String, String>>,
    ) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_offset_and_clamp() {
        let q = PaginationQuery { page: 3, limit: 20 };
        assert_eq!(q.offset(), 40);

        let q = PaginationQuery { page: 0, limit: 1000 };
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), MAX_PAGE_SIZE);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn test_offset_saturates_on_huge_page() {
        let q = PaginationQuery {
            page: i64::MAX,
            limit: 100,
        };
        assert_eq!(q.offset(), i64::MAX);
    }

    #[test]
    fn test_meta_pages_rounds_up() {
        assert_eq!(Meta::paginated(0, 1, 50).pages, 0);
        assert_eq!(Meta::paginated(50, 1, 50).pages, 1);
        assert_eq!(Meta::paginated(51, 1, 50).pages, 2);
    }
}
