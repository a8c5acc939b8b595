//! # blog-core
//!
//! Domain layer containing entities, value objects, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Article, ArticleCategory, Comment, CommentWithAuthor, NewArticle, NewComment, NewUser, User,
};
pub use error::DomainError;
pub use traits::{
    ArticleRepository, CategoryRepository, CommentRepository, RepoResult, UserRepository,
};
pub use value_objects::{
    validate_password_format, ArticleId, CategoryId, CommentId, IdParseError, Mobile, Page,
    PageRequest, UserId,
};
