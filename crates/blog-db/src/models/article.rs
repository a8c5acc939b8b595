//! Article database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for articles table
#[derive(Debug, Clone, FromRow)]
pub struct ArticleModel {
    pub id: i64,
    pub author_id: i64,
    pub category_id: Option<i64>,
    pub avatar: Option<String>,
    pub tags: String,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub total_views: i64,
    pub comments_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
