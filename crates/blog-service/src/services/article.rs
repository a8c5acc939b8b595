//! Article service
//!
//! Category listing, article detail and authoring.

use blog_core::{ArticleCategory, ArticleId, CategoryId, DomainError, NewArticle, Page, User};
use tracing::{info, instrument};

use crate::dto::{
    ArticleDetailQuery, ArticleDetailResponse, ArticleListQuery, ArticleListResponse,
    ArticleResponse, ArticleSummaryResponse, CategoryResponse, CommentResponse, PageMeta,
    WriteBlogForm,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::storage::MediaKind;

/// Number of articles in the "hot" sidebar
pub const HOT_ARTICLE_LIMIT: i64 = 9;

/// Article service
pub struct ArticleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ArticleService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All categories, oldest first
    #[instrument(skip(self))]
    pub async fn categories(&self) -> ServiceResult<Vec<CategoryResponse>> {
        let categories = self.ctx.category_repo().find_all().await?;
        Ok(categories.into_iter().map(CategoryResponse::from).collect())
    }

    /// One page of a category, newest article first
    #[instrument(skip(self, query))]
    pub async fn list(&self, query: ArticleListQuery) -> ServiceResult<ArticleListResponse> {
        let categories = self.ctx.category_repo().find_all().await?;
        let category = self.selected_category(query.category_id()?, &categories)?;

        let request = query.page_request()?;
        let total = self.ctx.article_repo().count_by_category(category.id).await?;
        request.ensure_within(total)?;

        let articles = self
            .ctx
            .article_repo()
            .find_by_category(category.id, request)
            .await?;

        let media_url = self.ctx.media_url();
        let page = Page::new(articles, request, total)
            .map(|a| ArticleSummaryResponse::from_article(&a, media_url));

        Ok(ArticleListResponse {
            category: CategoryResponse::from(category),
            categories: categories.iter().map(CategoryResponse::from).collect(),
            page: PageMeta::from(&page),
            articles: page.items,
        })
    }

    fn selected_category<'c>(
        &self,
        requested: Option<CategoryId>,
        categories: &'c [ArticleCategory],
    ) -> ServiceResult<&'c ArticleCategory> {
        match requested {
            Some(id) => categories
                .iter()
                .find(|c| c.id == id)
                .ok_or_else(|| DomainError::CategoryNotFound(id).into()),
            // Categories come back ordered by id, so the first is the default
            None => categories
                .first()
                .ok_or_else(|| ServiceError::not_found("Category", "default")),
        }
    }

    /// An article with its comments; counts as one view
    ///
    /// The view is only recorded once the requested comment page is known
    /// to exist.
    #[instrument(skip(self, query))]
    pub async fn detail(&self, query: ArticleDetailQuery) -> ServiceResult<ArticleDetailResponse> {
        let id = query.article_id()?;
        let request = query.page_request()?;

        if self.ctx.article_repo().find_by_id(id).await?.is_none() {
            return Err(DomainError::ArticleNotFound(id).into());
        }

        let total = self.ctx.comment_repo().count_by_article(id).await?;
        request.ensure_within(total)?;

        let article = self
            .ctx
            .article_repo()
            .increment_views(id)
            .await?
            .ok_or(DomainError::ArticleNotFound(id))?;

        let categories = self.ctx.category_repo().find_all().await?;
        let hot = self.ctx.article_repo().find_hot(HOT_ARTICLE_LIMIT).await?;
        let comments = self.ctx.comment_repo().find_by_article(id, request).await?;

        let media_url = self.ctx.media_url();
        let page = Page::new(comments, request, total)
            .map(|c| CommentResponse::from_comment(c, media_url));

        Ok(ArticleDetailResponse {
            article: ArticleResponse::from_article(&article, media_url),
            categories: categories.iter().map(CategoryResponse::from).collect(),
            hot_articles: hot
                .iter()
                .map(|a| ArticleSummaryResponse::from_article(a, media_url))
                .collect(),
            page: PageMeta::from(&page),
            comments: page.items,
        })
    }

    /// Publish an article written by `author`
    #[instrument(skip(self, author, form), fields(author_id = %author.id))]
    pub async fn create(&self, author: &User, form: WriteBlogForm) -> ServiceResult<ArticleId> {
        const ACTION: &str = "Publishing";

        let draft = form.validate_fields()?;

        let no_such_category = || ServiceError::validation("No such category");
        self.ctx
            .category_repo()
            .find_by_id(draft.category_id)
            .await
            .map_err(|e| ServiceError::from(e).or_retry_later(ACTION))?
            .ok_or_else(no_such_category)?;

        let avatar = self
            .ctx
            .storage()
            .save(MediaKind::Article, &draft.avatar)
            .await
            .map_err(|e| e.or_retry_later(ACTION))?;

        let article = self
            .ctx
            .article_repo()
            .create(&NewArticle {
                author_id: author.id,
                category_id: draft.category_id,
                avatar: Some(avatar),
                tags: draft.tags,
                title: draft.title,
                summary: draft.summary,
                content: draft.content,
            })
            .await
            .map_err(|e| match e {
                // Category deleted between the check and the insert
                DomainError::CategoryNotFound(_) => no_such_category(),
                other => ServiceError::from(other).or_retry_later(ACTION),
            })?;

        info!(article_id = %article.id, "Article published");
        Ok(article.id)
    }
}
