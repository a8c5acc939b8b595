//! Comment entity <-> model mapper

use blog_core::entities::{Comment, CommentWithAuthor};
use blog_core::value_objects::{ArticleId, CommentId, UserId};

use crate::models::{CommentModel, CommentWithAuthorModel};

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: CommentId::new(model.id),
            content: model.content,
            article_id: model.article_id.map(ArticleId::new),
            user_id: model.user_id.map(UserId::new),
            created_at: model.created_at,
        }
    }
}

impl From<CommentWithAuthorModel> for CommentWithAuthor {
    fn from(model: CommentWithAuthorModel) -> Self {
        CommentWithAuthor {
            comment: Comment {
                id: CommentId::new(model.id),
                content: model.content,
                article_id: model.article_id.map(ArticleId::new),
                user_id: model.user_id.map(UserId::new),
                created_at: model.created_at,
            },
            author_name: model.author_name,
            author_avatar: model.author_avatar,
        }
    }
}
