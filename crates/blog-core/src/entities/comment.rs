//! Comment entity

use chrono::{DateTime, Utc};

use crate::value_objects::{ArticleId, CommentId, UserId};

/// A reader comment on an article
///
/// Both foreign keys are nullable: deleting the article or the user keeps
/// the comment row and clears the reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    pub article_id: Option<ArticleId>,
    pub user_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

/// A comment joined with the display name of its author
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentWithAuthor {
    pub comment: Comment,
    pub author_name: Option<String>,
    pub author_avatar: Option<String>,
}

/// Values needed to insert a new comment
#[derive(Debug, Clone)]
pub struct NewComment {
    pub article_id: ArticleId,
    pub user_id: UserId,
    pub content: String,
}

impl NewComment {
    pub fn new(article_id: ArticleId, user_id: UserId, content: impl Into<String>) -> Self {
        Self {
            article_id,
            user_id,
            content: content.into(),
        }
    }

    /// Whitespace-only comments are treated as missing
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}
