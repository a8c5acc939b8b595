//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod article;
pub mod auth;
pub mod comment;
pub mod context;
pub mod error;
pub mod profile;
pub mod storage;
pub mod verification;

#[cfg(test)]
pub(crate) mod testing;

// Re-export all services for convenience
pub use article::{ArticleService, HOT_ARTICLE_LIMIT};
pub use auth::AuthService;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use profile::ProfileService;
pub use storage::{MediaKind, MediaStorage};
pub use verification::{generate_sms_code, image_code_matches, VerificationService, SMS_CODE_LEN};
