//! Comment service

use blog_core::{ArticleId, DomainError, NewComment, User};
use tracing::{info, instrument};

use crate::dto::CommentForm;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post a comment as `user` and return the article it belongs to
    ///
    /// The insert and the article's comment counter move together.
    #[instrument(skip(self, user, form), fields(user_id = %user.id))]
    pub async fn create(&self, user: &User, form: CommentForm) -> ServiceResult<ArticleId> {
        const ACTION: &str = "Comment";

        let article_id = form.article_id()?;
        if self
            .ctx
            .article_repo()
            .find_by_id(article_id)
            .await
            .map_err(|e| ServiceError::from(e).or_retry_later(ACTION))?
            .is_none()
        {
            return Err(DomainError::ArticleNotFound(article_id).into());
        }

        let comment = NewComment::new(article_id, user.id, form.content.unwrap_or_default());
        if comment.is_blank() {
            return Err(DomainError::MissingParameters.into());
        }

        let created = self
            .ctx
            .comment_repo()
            .create(&comment)
            .await
            .map_err(|e| ServiceError::from(e).or_retry_later(ACTION))?;

        info!(comment_id = %created.id, article_id = %article_id, "Comment posted");
        Ok(article_id)
    }
}
