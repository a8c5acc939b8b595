//! Article entity <-> model mapper

use blog_core::entities::{Article, NewArticle};
use blog_core::value_objects::{ArticleId, CategoryId, UserId};

use crate::models::ArticleModel;

/// Convert ArticleModel to Article entity
impl From<ArticleModel> for Article {
    fn from(model: ArticleModel) -> Self {
        Article {
            id: ArticleId::new(model.id),
            author_id: UserId::new(model.author_id),
            category_id: model.category_id.map(CategoryId::new),
            avatar: model.avatar,
            tags: model.tags,
            title: model.title,
            summary: model.summary,
            content: model.content,
            total_views: model.total_views,
            comments_count: model.comments_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Values bound when inserting a new article
pub struct ArticleInsert<'a> {
    pub author_id: i64,
    pub category_id: i64,
    pub avatar: Option<&'a str>,
    pub tags: &'a str,
    pub title: &'a str,
    pub summary: &'a str,
    pub content: &'a str,
}

impl<'a> ArticleInsert<'a> {
    pub fn new(article: &'a NewArticle) -> Self {
        Self {
            author_id: article.author_id.into_inner(),
            category_id: article.category_id.into_inner(),
            avatar: article.avatar.as_deref(),
            tags: &article.tags,
            title: &article.title,
            summary: &article.summary,
            content: &article.content,
        }
    }
}
