use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Application review status matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "application_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Pending,
    Reviewing,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Pending,
        ApplicationStatus::Reviewing,
        ApplicationStatus::Approved,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::Reviewing => "REVIEWING",
            ApplicationStatus::Approved => "APPROVED",
            ApplicationStatus::Rejected => "REJECTED",
        }
    }

    /// Label shown in spreadsheet exports
    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "검토대기",
            ApplicationStatus::Reviewing => "검토중",
            ApplicationStatus::Approved => "승인",
            ApplicationStatus::Rejected => "반려",
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Invalid status '{}'", s))
    }
}

/// Service type requested on the application form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "project_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Youtube,
    Seo,
    Sns,
    Local,
    Payment,
    Consulting,
}

impl ProjectType {
    pub const ALL: [ProjectType; 6] = [
        ProjectType::Youtube,
        ProjectType::Seo,
        ProjectType::Sns,
        ProjectType::Local,
        ProjectType::Payment,
        ProjectType::Consulting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Youtube => "youtube",
            ProjectType::Seo => "seo",
            ProjectType::Sns => "sns",
            ProjectType::Local => "local",
            ProjectType::Payment => "payment",
            ProjectType::Consulting => "consulting",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectType::Youtube => "YouTube 영상 마케팅 자동화",
            ProjectType::Seo => "SEO/AEO 최적화",
            ProjectType::Sns => "SNS 마케팅 관리",
            ProjectType::Local => "로컬 비즈니스 마케팅",
            ProjectType::Payment => "스테이블코인 결제 시스템",
            ProjectType::Consulting => "AI 마케팅 컨설팅",
        }
    }
}

impl FromStr for ProjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Invalid project type '{}'", s))
    }
}

/// Monthly budget bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "budget_range")]
pub enum BudgetRange {
    #[sqlx(rename = "under_10m")]
    #[serde(rename = "under_10m")]
    Under10m,
    #[sqlx(rename = "range_10m_50m")]
    #[serde(rename = "range_10m_50m")]
    Range10m50m,
    #[sqlx(rename = "range_50m_100m")]
    #[serde(rename = "range_50m_100m")]
    Range50m100m,
    #[sqlx(rename = "range_100m_500m")]
    #[serde(rename = "range_100m_500m")]
    Range100m500m,
    #[sqlx(rename = "over_500m")]
    #[serde(rename = "over_500m")]
    Over500m,
}

impl BudgetRange {
    pub const ALL: [BudgetRange; 5] = [
        BudgetRange::Under10m,
        BudgetRange::Range10m50m,
        BudgetRange::Range50m100m,
        BudgetRange::Range100m500m,
        BudgetRange::Over500m,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetRange::Under10m => "under_10m",
            BudgetRange::Range10m50m => "range_10m_50m",
            BudgetRange::Range50m100m => "range_50m_100m",
            BudgetRange::Range100m500m => "range_100m_500m",
            BudgetRange::Over500m => "over_500m",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BudgetRange::Under10m => "월 50만원 미만",
            BudgetRange::Range10m50m => "월 50만원 ~ 100만원",
            BudgetRange::Range50m100m => "월 100만원 ~ 200만원",
            BudgetRange::Range100m500m => "월 200만원 ~ 500만원",
            BudgetRange::Over500m => "월 500만원 이상",
        }
    }
}

impl FromStr for BudgetRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| format!("Invalid budget range '{}'", s))
    }
}

/// Database model for a submitted application
#[derive(Debug, Clone, FromRow)]
pub struct Application {
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
    /// Current marketing situation
    pub ai_requirements: String,
    /// Goals and challenges
    pub blockchain_needs: String,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const APPLICATION_COLUMNS: &str = "id, tracking_code, company_name, contact_name, \
    contact_email, contact_phone, project_title, project_type, budget_range, timeline, \
    description, ai_requirements, blockchain_needs, status, created_at, updated_at";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_json::to_value(BudgetRange::Range10m50m).unwrap(),
            "range_10m_50m"
        );
        assert_eq!(serde_json::to_value(ProjectType::Seo).unwrap(), "seo");
        assert_eq!(
            serde_json::to_value(ApplicationStatus::Reviewing).unwrap(),
            "REVIEWING"
        );
    }

    #[test]
    fn test_from_str_matches_wire_names() {
        for t in ProjectType::ALL {
            assert_eq!(t.as_str().parse::<ProjectType>().unwrap(), t);
        }
        for b in BudgetRange::ALL {
            assert_eq!(b.as_str().parse::<BudgetRange>().unwrap(), b);
        }
        for s in ApplicationStatus::ALL {
            assert_eq!(s.as_str().parse::<ApplicationStatus>().unwrap(), s);
        }
        assert!("pending".parse::<ApplicationStatus>().is_err());
        assert!("tiktok".parse::<ProjectType>().is_err());
    }
}
