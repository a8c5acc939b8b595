//! Request DTOs for API endpoints
//!
//! Browser forms send every field as text and may leave any of them out, so
//! the raw forms hold `Option<String>`s. Each form has a `validate_fields`
//! step that turns it into a typed input or a user-facing error.

use blog_core::{validate_password_format, ArticleId, CategoryId, DomainError, Mobile, PageRequest};
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::services::{ServiceError, ServiceResult};

/// Page size of the home page article list
pub const ARTICLE_PAGE_SIZE: u32 = 10;

/// Page size of the comment list under an article
pub const COMMENT_PAGE_SIZE: u32 = 5;

/// Trimmed value, or `None` when the field is absent or blank
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// First message out of a `validator` error set
pub fn first_validation_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .into_values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(ToString::to_string))
        .unwrap_or_else(|| "Invalid input".to_string())
}

fn check<T: Validate>(value: T) -> ServiceResult<T> {
    value
        .validate()
        .map_err(|e| ServiceError::validation(first_validation_message(&e)))?;
    Ok(value)
}

/// Page number from a query string; anything that is not a positive integer names no page
fn parse_page_number(raw: Option<&str>) -> ServiceResult<u32> {
    match raw.map(str::trim).filter(|r| !r.is_empty()) {
        None => Ok(1),
        Some(r) => r
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| ServiceError::not_found("Page", r)),
    }
}

fn parse_page_size(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|r| r.trim().parse::<u32>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

// ============================================================================
// Auth Requests
// ============================================================================

/// Registration form; the password reset form has the same fields
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterForm {
    pub mobile: Option<String>,
    pub password: Option<String>,
    pub password2: Option<String>,
    pub sms_code: Option<String>,
}

/// Password reset form
pub type ForgetPasswordForm = RegisterForm;

/// A registration or reset form that passed every format check
#[derive(Debug, Clone)]
pub struct Credentials {
    pub mobile: Mobile,
    pub password: String,
    pub sms_code: String,
}

impl RegisterForm {
    pub fn validate_fields(self) -> Result<Credentials, DomainError> {
        let (Some(mobile), Some(password), Some(password2), Some(sms_code)) = (
            non_blank(self.mobile),
            non_blank(self.password),
            non_blank(self.password2),
            non_blank(self.sms_code),
        ) else {
            return Err(DomainError::MissingParameters);
        };

        let mobile = Mobile::parse(mobile.trim())?;
        validate_password_format(&password)?;
        if password != password2 {
            return Err(DomainError::PasswordMismatch);
        }

        Ok(Credentials {
            mobile,
            password,
            sms_code: sms_code.trim().to_string(),
        })
    }
}

/// Login form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    pub mobile: Option<String>,
    pub password: Option<String>,
    /// Checkbox; browsers send `on` when it is ticked
    pub remember: Option<String>,
    pub next: Option<String>,
}

/// A login form that passed every format check
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub mobile: Mobile,
    pub password: String,
    pub remember: bool,
}

impl LoginForm {
    pub fn validate_fields(self) -> Result<LoginInput, DomainError> {
        let (Some(mobile), Some(password)) = (non_blank(self.mobile), non_blank(self.password))
        else {
            return Err(DomainError::MissingParameters);
        };

        let mobile = Mobile::parse(mobile.trim())?;
        validate_password_format(&password)?;

        Ok(LoginInput {
            mobile,
            password,
            remember: self.remember.as_deref() == Some("on"),
        })
    }
}

/// Query string that may carry a post-login destination
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

// ============================================================================
// Verification Requests
// ============================================================================

/// `GET /imagecode`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageCodeQuery {
    pub uuid: Option<String>,
}

/// `GET /smscode`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SmsCodeQuery {
    pub mobile: Option<String>,
    pub image_code: Option<String>,
    pub uuid: Option<String>,
}

/// An SMS code request with every field present and the mobile checked
#[derive(Debug, Clone)]
pub struct SmsCodeInput {
    pub mobile: Mobile,
    pub image_code: String,
    pub uuid: String,
}

impl SmsCodeQuery {
    pub fn validate_fields(self) -> Result<SmsCodeInput, DomainError> {
        let (Some(mobile), Some(image_code), Some(uuid)) = (
            non_blank(self.mobile),
            non_blank(self.image_code),
            non_blank(self.uuid),
        ) else {
            return Err(DomainError::MissingParameters);
        };

        Ok(SmsCodeInput {
            mobile: Mobile::parse(mobile.trim())?,
            image_code: image_code.trim().to_string(),
            uuid: uuid.trim().to_string(),
        })
    }
}

// ============================================================================
// Article Requests
// ============================================================================

/// `GET /`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleListQuery {
    pub cat_id: Option<String>,
    pub page_num: Option<String>,
    pub page_size: Option<String>,
}

impl ArticleListQuery {
    /// Requested category; `None` means "the first one"
    pub fn category_id(&self) -> ServiceResult<Option<CategoryId>> {
        match self.cat_id.as_deref().map(str::trim).filter(|r| !r.is_empty()) {
            None => Ok(None),
            Some(raw) => raw
                .parse::<CategoryId>()
                .map(Some)
                .map_err(|_| ServiceError::not_found("Category", raw)),
        }
    }

    pub fn page_request(&self) -> ServiceResult<PageRequest> {
        Ok(PageRequest::new(
            parse_page_number(self.page_num.as_deref())?,
            parse_page_size(self.page_size.as_deref(), ARTICLE_PAGE_SIZE),
        ))
    }
}

/// `GET /detail`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleDetailQuery {
    pub id: Option<String>,
    pub page_num: Option<String>,
    pub page_size: Option<String>,
}

impl ArticleDetailQuery {
    pub fn article_id(&self) -> ServiceResult<ArticleId> {
        parse_article_id(self.id.as_deref())
    }

    pub fn page_request(&self) -> ServiceResult<PageRequest> {
        Ok(PageRequest::new(
            parse_page_number(self.page_num.as_deref())?,
            parse_page_size(self.page_size.as_deref(), COMMENT_PAGE_SIZE),
        ))
    }
}

fn parse_article_id(raw: Option<&str>) -> ServiceResult<ArticleId> {
    let raw = raw.map(str::trim).unwrap_or_default();
    raw.parse::<ArticleId>()
        .map_err(|_| ServiceError::not_found("Article", raw))
}

/// `POST /detail`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentForm {
    pub id: Option<String>,
    pub content: Option<String>,
}

impl CommentForm {
    pub fn article_id(&self) -> ServiceResult<ArticleId> {
        parse_article_id(self.id.as_deref())
    }
}

/// A file part of a multipart form
#[derive(Debug, Clone, Default)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// `POST /writeblog`, collected from a multipart body
#[derive(Debug, Clone, Default)]
pub struct WriteBlogForm {
    pub avatar: Option<UploadedFile>,
    pub title: Option<String>,
    pub category_id: Option<String>,
    pub tags: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
}

/// A new article that passed presence and length checks
#[derive(Debug, Clone, Validate)]
pub struct ArticleDraft {
    pub avatar: UploadedFile,

    #[validate(length(max = 100, message = "Title must be at most 100 characters"))]
    pub title: String,

    pub category_id: CategoryId,

    #[validate(length(max = 20, message = "Tags must be at most 20 characters"))]
    pub tags: String,

    #[validate(length(max = 200, message = "Summary must be at most 200 characters"))]
    pub summary: String,

    pub content: String,
}

impl WriteBlogForm {
    pub fn validate_fields(self) -> ServiceResult<ArticleDraft> {
        let (Some(avatar), Some(title), Some(category_id), Some(tags), Some(summary), Some(content)) = (
            self.avatar.filter(|f| !f.is_empty()),
            non_blank(self.title),
            non_blank(self.category_id),
            non_blank(self.tags),
            non_blank(self.summary),
            non_blank(self.content),
        ) else {
            return Err(DomainError::MissingParameters.into());
        };

        let category_id = category_id
            .parse::<CategoryId>()
            .map_err(|_| ServiceError::validation("No such category"))?;

        check(ArticleDraft {
            avatar,
            title: title.trim().to_string(),
            category_id,
            tags: tags.trim().to_string(),
            summary: summary.trim().to_string(),
            content,
        })
    }
}

// ============================================================================
// Profile Requests
// ============================================================================

/// `POST /center`, collected from a multipart body
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileForm {
    pub username: Option<String>,
    pub user_desc: Option<String>,
    pub avatar: Option<UploadedFile>,
}

/// Profile values after falling back to the current ones
#[derive(Debug, Clone, Validate)]
pub struct ProfileUpdate {
    #[validate(length(min = 1, max = 150, message = "Username must be 1-150 characters"))]
    pub username: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub user_desc: String,

    pub avatar: Option<UploadedFile>,
}

impl UpdateProfileForm {
    /// Fill absent fields from the current profile and check lengths
    pub fn validate_fields(self, current_username: &str, current_desc: &str) -> ServiceResult<ProfileUpdate> {
        check(ProfileUpdate {
            username: non_blank(self.username)
                .map_or_else(|| current_username.to_string(), |u| u.trim().to_string()),
            user_desc: self.user_desc.unwrap_or_else(|| current_desc.to_string()),
            avatar: self.avatar.filter(|f| !f.is_empty()),
        })
    }
}
