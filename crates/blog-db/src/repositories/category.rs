//! PostgreSQL implementation of CategoryRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use blog_core::entities::ArticleCategory;
use blog_core::traits::{CategoryRepository, RepoResult};
use blog_core::value_objects::CategoryId;

use crate::models::CategoryModel;

use super::error::{category_not_found, map_db_error};

/// PostgreSQL implementation of CategoryRepository
#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<ArticleCategory>> {
        let results = sqlx::query_as::<_, CategoryModel>(
            r"
            SELECT id, title, created_at
            FROM article_categories
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ArticleCategory::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: CategoryId) -> RepoResult<Option<ArticleCategory>> {
        let result = sqlx::query_as::<_, CategoryModel>(
            r"
            SELECT id, title, created_at
            FROM article_categories
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ArticleCategory::from))
    }

    #[instrument(skip(self))]
    async fn find_first(&self) -> RepoResult<Option<ArticleCategory>> {
        let result = sqlx::query_as::<_, CategoryModel>(
            r"
            SELECT id, title, created_at
            FROM article_categories
            ORDER BY id ASC
            LIMIT 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ArticleCategory::from))
    }

    #[instrument(skip(self))]
    async fn create(&self, title: &str) -> RepoResult<ArticleCategory> {
        let model = sqlx::query_as::<_, CategoryModel>(
            r"
            INSERT INTO article_categories (title)
            VALUES ($1)
            RETURNING id, title, created_at
            ",
        )
        .bind(title)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ArticleCategory::from(model))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: CategoryId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM article_categories WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(category_not_found(id));
        }

        Ok(())
    }
}
