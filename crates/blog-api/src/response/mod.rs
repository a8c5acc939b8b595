//! Response types and error handling for page endpoints
//!
//! Form and lookup failures are reported as `text/plain` bodies. Successful
//! mutations answer with a `302 Found` redirect.

mod cookies;

pub use cookies::{
    clear_login_cookies, login_cookies, safe_next, username_cookie, IS_LOGIN_COOKIE,
    SESSION_COOKIE, USERNAME_COOKIE,
};

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use blog_common::AppError;
use blog_core::DomainError;
use blog_service::ServiceError;
use thiserror::Error;
use tracing::error;

/// Body sent in place of any internal failure
pub const RETRY_LATER_MESSAGE: &str = "Something went wrong, please try again later";

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    BadRequest(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::App(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::Service(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::Domain(e) => {
                if e.is_not_found() {
                    StatusCode::NOT_FOUND
                } else if e.is_validation() {
                    StatusCode::BAD_REQUEST
                } else if e.is_conflict() {
                    StatusCode::CONFLICT
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for log lines
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::App(e) => e.error_code(),
            Self::Service(e) => e.error_code(),
            Self::Domain(e) => e.code(),
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    /// Create a 400 with a custom message
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internals stay in the log; the browser only learns to retry
        if status.is_server_error() {
            error!(error = ?self, code = self.error_code(), "Server error occurred");
            return (StatusCode::BAD_REQUEST, RETRY_LATER_MESSAGE).into_response();
        }

        (status, self.to_string()).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// `302 Found` redirect
///
/// `axum::response::Redirect` only offers 303, 307 and 308.
#[derive(Debug, Clone)]
pub struct Found(String);

impl Found {
    pub fn to(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    pub fn location(&self) -> &str {
        &self.0
    }
}

impl IntoResponse for Found {
    fn into_response(self) -> Response {
        match HeaderValue::try_from(self.0) {
            Ok(location) => (StatusCode::FOUND, [(header::LOCATION, location)]).into_response(),
            Err(e) => ApiError::internal(e).into_response(),
        }
    }
}

/// Send an anonymous visitor to the login page, coming back to `next` afterwards
pub fn login_redirect(next: &str) -> Found {
    Found::to(format!("/login?next={}", urlencoding::encode(next)))
}
