//! Comment database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for comments table
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: i64,
    pub content: String,
    pub article_id: Option<i64>,
    pub user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// A comment row joined with its author (LEFT JOIN, so the author may be gone)
#[derive(Debug, Clone, FromRow)]
pub struct CommentWithAuthorModel {
    pub id: i64,
    pub content: String,
    pub article_id: Option<i64>,
    pub user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub author_name: Option<String>,
    pub author_avatar: Option<String>,
}
