//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Page endpoints
//! return these as the context a template would otherwise be rendered with.

use blog_core::{ArticleId, CategoryId, CommentId, DomainError, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::services::ServiceError;

// ============================================================================
// Category / Article Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CategoryResponse {
    pub id: CategoryId,
    pub title: String,
}

/// Article as shown in a list (no body)
#[derive(Debug, Clone, Serialize)]
pub struct ArticleSummaryResponse {
    pub id: ArticleId,
    pub author_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub title: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub total_views: i64,
    pub comments_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Article with its body
#[derive(Debug, Clone, Serialize)]
pub struct ArticleResponse {
    #[serde(flatten)]
    pub summary: ArticleSummaryResponse,
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: CommentId,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Pager numbers shared by the list and detail pages
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PageMeta {
    pub page_num: u32,
    pub page_size: u32,
    pub total_page: u32,
    pub total_count: i64,
}

impl<T> From<&blog_core::Page<T>> for PageMeta {
    fn from(page: &blog_core::Page<T>) -> Self {
        Self {
            page_num: page.page_num,
            page_size: page.page_size,
            total_page: page.total_page,
            total_count: page.total_count,
        }
    }
}

/// Context of the home page
#[derive(Debug, Clone, Serialize)]
pub struct ArticleListResponse {
    pub categories: Vec<CategoryResponse>,
    pub category: CategoryResponse,
    pub articles: Vec<ArticleSummaryResponse>,
    #[serde(flatten)]
    pub page: PageMeta,
}

/// Context of the article detail page
#[derive(Debug, Clone, Serialize)]
pub struct ArticleDetailResponse {
    pub article: ArticleResponse,
    pub categories: Vec<CategoryResponse>,
    pub hot_articles: Vec<ArticleSummaryResponse>,
    pub comments: Vec<CommentResponse>,
    #[serde(flatten)]
    pub page: PageMeta,
}

/// Context of the authoring page
#[derive(Debug, Clone, Serialize)]
pub struct WriteBlogResponse {
    pub categories: Vec<CategoryResponse>,
}

// ============================================================================
// User Responses
// ============================================================================

/// Context of the personal center page
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub username: String,
    pub mobile: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub user_desc: String,
}

/// A session that was just opened for a user
#[derive(Debug, Clone)]
pub struct SessionGrant {
    pub session_id: String,
    pub user_id: UserId,
    pub username: String,
    /// Whether the browser should keep the cookie past the current session
    pub remember: bool,
}

/// Context of the login, register and password reset pages
#[derive(Debug, Clone, Serialize)]
pub struct FormPageResponse {
    pub page: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl FormPageResponse {
    pub fn new(page: &'static str) -> Self {
        Self { page, next: None }
    }

    pub fn with_next(mut self, next: Option<String>) -> Self {
        self.next = next;
        self
    }
}

// ============================================================================
// JSON envelope
// ============================================================================

/// Status codes of the `{code, errmsg}` envelope used by AJAX endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetCode {
    Ok,
    ImageCodeErr,
    ThrottlingErr,
    NecessaryParamErr,
    MobileErr,
    SmsCodeErr,
    DbErr,
}

impl RetCode {
    pub fn code(self) -> &'static str {
        match self {
            Self::Ok => "0",
            Self::ImageCodeErr => "4001",
            Self::ThrottlingErr => "4002",
            Self::NecessaryParamErr => "4003",
            Self::MobileErr => "4007",
            Self::SmsCodeErr => "4008",
            Self::DbErr => "5000",
        }
    }

    pub fn default_message(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::ImageCodeErr => "Image code is incorrect",
            Self::ThrottlingErr => "Requests are too frequent",
            Self::NecessaryParamErr => "Missing required parameters",
            Self::MobileErr => "Invalid mobile number",
            Self::SmsCodeErr => "SMS code is incorrect",
            Self::DbErr => "Data error",
        }
    }
}

impl From<&ServiceError> for RetCode {
    fn from(err: &ServiceError) -> Self {
        match err {
            ServiceError::Domain(DomainError::MissingParameters) => Self::NecessaryParamErr,
            ServiceError::Domain(DomainError::InvalidMobile) => Self::MobileErr,
            ServiceError::Domain(
                DomainError::VerificationCodeExpired | DomainError::VerificationCodeMismatch,
            ) => Self::ImageCodeErr,
            ServiceError::Throttled => Self::ThrottlingErr,
            _ => Self::DbErr,
        }
    }
}

/// `{code, errmsg}` body
#[derive(Debug, Clone, Serialize)]
pub struct RetResponse {
    pub code: &'static str,
    pub errmsg: String,
}

impl RetResponse {
    pub fn ok(errmsg: impl Into<String>) -> Self {
        Self {
            code: RetCode::Ok.code(),
            errmsg: errmsg.into(),
        }
    }

    pub fn from_error(err: &ServiceError) -> Self {
        let code = RetCode::from(err);
        let errmsg = match code {
            RetCode::DbErr if err.is_infrastructure() => code.default_message().to_string(),
            _ => err.to_string(),
        };
        Self {
            code: code.code(),
            errmsg,
        }
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backend
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub redis: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, redis_healthy: bool) -> Self {
        let all_healthy = database_healthy && redis_healthy;
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
                redis: if redis_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
