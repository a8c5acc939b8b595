//! # blog-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the repository traits
//! defined in `blog-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! The table layout lives in `schema.sql` next to this crate's manifest.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use blog_db::pool::{create_pool, DatabaseConfig};
//! use blog_db::repositories::PgArticleRepository;
//! use blog_core::traits::ArticleRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::new("postgres://localhost/blog")).await?;
//!     let articles = PgArticleRepository::new(pool);
//!     let hot = articles.find_hot(9).await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, ping, DatabaseConfig, PgPool};
pub use repositories::{
    PgArticleRepository, PgCategoryRepository, PgCommentRepository, PgUserRepository,
};
