//! Entity to DTO mappers
//!
//! Plain fields map with `From`. Anything holding an uploaded file path needs
//! the public media prefix, so those conversions take it as an argument.

use blog_core::{Article, ArticleCategory, CommentWithAuthor, User};

use super::responses::{
    ArticleResponse, ArticleSummaryResponse, CategoryResponse, CommentResponse, ProfileResponse,
};

fn media_url_for(media_url: &str, path: Option<&str>) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| format!("{}/{}", media_url.trim_end_matches('/'), p))
}

// ============================================================================
// Category Mappers
// ============================================================================

impl From<&ArticleCategory> for CategoryResponse {
    fn from(category: &ArticleCategory) -> Self {
        Self {
            id: category.id,
            title: category.title.clone(),
        }
    }
}

impl From<ArticleCategory> for CategoryResponse {
    fn from(category: ArticleCategory) -> Self {
        Self {
            id: category.id,
            title: category.title,
        }
    }
}

// ============================================================================
// Article Mappers
// ============================================================================

impl ArticleSummaryResponse {
    pub fn from_article(article: &Article, media_url: &str) -> Self {
        Self {
            id: article.id,
            author_id: article.author_id,
            category_id: article.category_id,
            avatar_url: media_url_for(media_url, article.avatar.as_deref()),
            title: article.title.clone(),
            summary: article.summary.clone(),
            tags: article.tag_list().into_iter().map(str::to_string).collect(),
            total_views: article.total_views,
            comments_count: article.comments_count,
            created_at: article.created_at,
        }
    }
}

impl ArticleResponse {
    pub fn from_article(article: &Article, media_url: &str) -> Self {
        Self {
            summary: ArticleSummaryResponse::from_article(article, media_url),
            content: article.content.clone(),
            updated_at: article.updated_at,
        }
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

impl CommentResponse {
    pub fn from_comment(entry: CommentWithAuthor, media_url: &str) -> Self {
        Self {
            id: entry.comment.id,
            author_avatar_url: media_url_for(media_url, entry.author_avatar.as_deref()),
            author_name: entry.author_name,
            content: entry.comment.content,
            created_at: entry.comment.created_at,
        }
    }
}

// ============================================================================
// User Mappers
// ============================================================================

impl ProfileResponse {
    pub fn from_user(user: &User, media_url: &str) -> Self {
        Self {
            username: user.username.clone(),
            mobile: user.mobile.to_string(),
            avatar_url: user.avatar_url(media_url),
            user_desc: user.user_desc.clone(),
        }
    }
}
