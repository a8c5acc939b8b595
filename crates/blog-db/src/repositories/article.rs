//! PostgreSQL implementation of ArticleRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use blog_core::entities::{Article, NewArticle};
use blog_core::traits::{ArticleRepository, RepoResult};
use blog_core::value_objects::{ArticleId, CategoryId, PageRequest};

use crate::mappers::ArticleInsert;
use crate::models::ArticleModel;

use super::error::{article_not_found, category_not_found, map_db_error, map_foreign_key_violation};

const ARTICLE_COLUMNS: &str = "id, author_id, category_id, avatar, tags, title, summary, content, \
                               total_views, comments_count, created_at, updated_at";

/// PostgreSQL implementation of ArticleRepository
#[derive(Clone)]
pub struct PgArticleRepository {
    pool: PgPool,
}

impl PgArticleRepository {
    /// Create a new PgArticleRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleRepository for PgArticleRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ArticleId) -> RepoResult<Option<Article>> {
        let result = sqlx::query_as::<_, ArticleModel>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Article::from))
    }

    #[instrument(skip(self))]
    async fn count_by_category(&self, category_id: CategoryId) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM articles WHERE category_id = $1")
            .bind(category_id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn find_by_category(
        &self,
        category_id: CategoryId,
        page: PageRequest,
    ) -> RepoResult<Vec<Article>> {
        let results = sqlx::query_as::<_, ArticleModel>(&format!(
            r"
            SELECT {ARTICLE_COLUMNS}
            FROM articles
            WHERE category_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "
        ))
        .bind(category_id.into_inner())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Article::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_hot(&self, limit: i64) -> RepoResult<Vec<Article>> {
        let results = sqlx::query_as::<_, ArticleModel>(&format!(
            r"
            SELECT {ARTICLE_COLUMNS}
            FROM articles
            ORDER BY total_views DESC, id DESC
            LIMIT $1
            "
        ))
        .bind(limit.clamp(1, 100))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Article::from).collect())
    }

    #[instrument(skip(self, article), fields(author_id = %article.author_id))]
    async fn create(&self, article: &NewArticle) -> RepoResult<Article> {
        let insert = ArticleInsert::new(article);
        let model = sqlx::query_as::<_, ArticleModel>(&format!(
            r"
            INSERT INTO articles (author_id, category_id, avatar, tags, title, summary, content)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {ARTICLE_COLUMNS}
            "
        ))
        .bind(insert.author_id)
        .bind(insert.category_id)
        .bind(insert.avatar)
        .bind(insert.tags)
        .bind(insert.title)
        .bind(insert.summary)
        .bind(insert.content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_foreign_key_violation(e, || category_not_found(article.category_id)))?;

        Ok(Article::from(model))
    }

    #[instrument(skip(self))]
    async fn increment_views(&self, id: ArticleId) -> RepoResult<Option<Article>> {
        // Single statement so concurrent readers never lose an increment
        let result = sqlx::query_as::<_, ArticleModel>(&format!(
            r"
            UPDATE articles
            SET total_views = total_views + 1
            WHERE id = $1
            RETURNING {ARTICLE_COLUMNS}
            "
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Article::from))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ArticleId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(article_not_found(id));
        }

        Ok(())
    }
}
