//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{ArticleId, CategoryId, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("No such category: {0}")]
    CategoryNotFound(CategoryId),

    #[error("Article not found: {0}")]
    ArticleNotFound(ArticleId),

    #[error("Empty page: {0}")]
    PageNotFound(u32),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Missing required parameters")]
    MissingParameters,

    #[error("Please enter a valid mobile number")]
    InvalidMobile,

    #[error("Password must be 8-20 letters or digits")]
    InvalidPassword,

    #[error("The two passwords do not match")]
    PasswordMismatch,

    #[error("Verification code has expired")]
    VerificationCodeExpired,

    #[error("Verification code is incorrect")]
    VerificationCodeMismatch,

    // =========================================================================
    // Authentication Errors
    // =========================================================================
    #[error("Incorrect mobile number or password")]
    InvalidCredentials,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Mobile number already registered")]
    MobileAlreadyExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::CategoryNotFound(_) => "UNKNOWN_CATEGORY",
            Self::ArticleNotFound(_) => "UNKNOWN_ARTICLE",
            Self::PageNotFound(_) => "EMPTY_PAGE",

            // Validation
            Self::MissingParameters => "MISSING_PARAMETERS",
            Self::InvalidMobile => "INVALID_MOBILE",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::PasswordMismatch => "PASSWORD_MISMATCH",
            Self::VerificationCodeExpired => "CODE_EXPIRED",
            Self::VerificationCodeMismatch => "CODE_MISMATCH",

            // Authentication
            Self::InvalidCredentials => "INVALID_CREDENTIALS",

            // Conflict
            Self::MobileAlreadyExists => "MOBILE_ALREADY_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::CategoryNotFound(_)
                | Self::ArticleNotFound(_)
                | Self::PageNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingParameters
                | Self::InvalidMobile
                | Self::InvalidPassword
                | Self::PasswordMismatch
                | Self::VerificationCodeExpired
                | Self::VerificationCodeMismatch
                | Self::InvalidCredentials
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::MobileAlreadyExists)
    }

    /// Check if this wraps an infrastructure failure
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::DatabaseError(_))
    }
}
