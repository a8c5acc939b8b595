//! # blog-service
//!
//! Application layer containing business logic, services, and DTOs.
//!
//! Services borrow a [`ServiceContext`] for the length of one request:
//!
//! ```rust,ignore
//! let detail = ArticleService::new(&ctx).detail(query).await?;
//! ```

pub mod dto;
pub mod gateways;
pub mod services;

pub use gateways::{
    BitmapCaptcha, Captcha, CaptchaError, CaptchaRenderer, HttpSmsGateway, LoggingSmsGateway,
    SmsError, SmsGateway,
};
pub use services::{
    ArticleService, AuthService, CommentService, MediaKind, MediaStorage, ProfileService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, VerificationService,
};
