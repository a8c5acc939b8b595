//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with field validation for form and query inputs
//! - Response DTOs for serializing page contexts and JSON envelopes
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    first_validation_message, ArticleDetailQuery, ArticleDraft, ArticleListQuery, CommentForm,
    Credentials, ForgetPasswordForm, ImageCodeQuery, LoginForm, LoginInput, NextQuery,
    ProfileUpdate, RegisterForm, SmsCodeInput, SmsCodeQuery, UpdateProfileForm, UploadedFile,
    WriteBlogForm, ARTICLE_PAGE_SIZE, COMMENT_PAGE_SIZE,
};

// Re-export commonly used response types
pub use responses::{
    ArticleDetailResponse, ArticleListResponse, ArticleResponse, ArticleSummaryResponse,
    CategoryResponse, CommentResponse, FormPageResponse, HealthChecks, HealthResponse, PageMeta,
    ProfileResponse, ReadinessResponse, RetCode, RetResponse, SessionGrant, WriteBlogResponse,
};
