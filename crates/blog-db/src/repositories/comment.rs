//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use blog_core::entities::{Comment, CommentWithAuthor, NewComment};
use blog_core::traits::{CommentRepository, RepoResult};
use blog_core::value_objects::{ArticleId, PageRequest};

use crate::models::{CommentModel, CommentWithAuthorModel};

use super::error::{article_not_found, map_db_error, map_foreign_key_violation};

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn count_by_article(&self, article_id: ArticleId) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments WHERE article_id = $1")
            .bind(article_id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn find_by_article(
        &self,
        article_id: ArticleId,
        page: PageRequest,
    ) -> RepoResult<Vec<CommentWithAuthor>> {
        let results = sqlx::query_as::<_, CommentWithAuthorModel>(
            r"
            SELECT c.id, c.content, c.article_id, c.user_id, c.created_at,
                   u.username AS author_name, u.avatar AS author_avatar
            FROM comments c
            LEFT JOIN users u ON u.id = c.user_id
            WHERE c.article_id = $1
            ORDER BY c.created_at DESC, c.id DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(article_id.into_inner())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(CommentWithAuthor::from).collect())
    }

    #[instrument(skip(self, comment), fields(article_id = %comment.article_id))]
    async fn create(&self, comment: &NewComment) -> RepoResult<Comment> {
        // The counter must move together with the row it counts
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let model = sqlx::query_as::<_, CommentModel>(
            r"
            INSERT INTO comments (content, article_id, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, content, article_id, user_id, created_at
            ",
        )
        .bind(&comment.content)
        .bind(comment.article_id.into_inner())
        .bind(comment.user_id.into_inner())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_foreign_key_violation(e, || article_not_found(comment.article_id)))?;

        let updated = sqlx::query(
            r"
            UPDATE articles
            SET comments_count = comments_count + 1, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(comment.article_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if updated.rows_affected() == 0 {
            return Err(article_not_found(comment.article_id));
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(Comment::from(model))
    }
}
