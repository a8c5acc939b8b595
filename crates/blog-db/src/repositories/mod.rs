//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in blog-core.
//! Each repository handles database operations for a specific domain entity.

mod article;
mod category;
mod comment;
mod error;
mod user;

pub use article::PgArticleRepository;
pub use category::PgCategoryRepository;
pub use comment::PgCommentRepository;
pub use user::PgUserRepository;
