//! Article entity

use chrono::{DateTime, Utc};

use crate::value_objects::{ArticleId, CategoryId, UserId};

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_SUMMARY_LEN: usize = 200;
pub const MAX_TAGS_LEN: usize = 20;

/// A published article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: ArticleId,
    pub author_id: UserId,
    pub category_id: Option<CategoryId>,
    /// Relative path of the title image under the media root
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

impl Article {
    /// Record one more read
    pub fn record_view(&mut self) {
        self.total_views += 1;
    }

    /// Record one more comment
    pub fn record_comment(&mut self) {
        self.comments_count += 1;
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Tags are stored as one short comma separated string
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split([',', '，'])
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

/// Values needed to insert a new article
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub author_id: UserId,
    pub category_id: CategoryId,
    pub avatar: Option<String>,
    pub tags: String,
    pub title: String,
    pub summary: String,
    pub content: String,
}
