//! Article category entity

use chrono::{DateTime, Utc};

use crate::value_objects::CategoryId;

/// A column that groups articles on the home page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleCategory {
    pub id: CategoryId,
    pub title: String,
    pub created_at: DateTime<Utc>,
}
