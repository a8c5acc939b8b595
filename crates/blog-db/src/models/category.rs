//! Article category database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for article_categories table
#[derive(Debug, Clone, FromRow)]
pub struct CategoryModel {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
}
