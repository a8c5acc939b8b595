//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{
    Article, ArticleCategory, Comment, CommentWithAuthor, NewArticle, NewComment, NewUser, User,
};
use crate::error::DomainError;
use crate::value_objects::{ArticleId, CategoryId, Mobile, PageRequest, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by mobile number (the login key)
    async fn find_by_mobile(&self, mobile: &Mobile) -> RepoResult<Option<User>>;

    /// Check if a mobile number is already registered
    async fn mobile_exists(&self, mobile: &Mobile) -> RepoResult<bool>;

    /// Create a new user and return it with its assigned id
    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User>;

    /// Persist username, bio and avatar
    async fn update_profile(&self, user: &User) -> RepoResult<()>;

    /// Delete a user; their articles go with them, their comments are orphaned
    async fn delete(&self, id: UserId) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: UserId, password_hash: &str) -> RepoResult<()>;
}

// ============================================================================
// Category Repository
// ============================================================================

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories in creation order
    async fn find_all(&self) -> RepoResult<Vec<ArticleCategory>>;

    /// Find category by ID
    async fn find_by_id(&self, id: CategoryId) -> RepoResult<Option<ArticleCategory>>;

    /// The category shown when none is requested (lowest id)
    async fn find_first(&self) -> RepoResult<Option<ArticleCategory>>;

    /// Create a new category
    async fn create(&self, title: &str) -> RepoResult<ArticleCategory>;

    /// Delete a category together with its articles
    async fn delete(&self, id: CategoryId) -> RepoResult<()>;
}

// ============================================================================
// Article Repository
// ============================================================================

#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Find article by ID without side effects
    async fn find_by_id(&self, id: ArticleId) -> RepoResult<Option<Article>>;

    /// Count articles in a category
    async fn count_by_category(&self, category_id: CategoryId) -> RepoResult<i64>;

    /// One page of a category's articles, newest first
    async fn find_by_category(
        &self,
        category_id: CategoryId,
        page: PageRequest,
    ) -> RepoResult<Vec<Article>>;

    /// Most viewed articles
    async fn find_hot(&self, limit: i64) -> RepoResult<Vec<Article>>;

    /// Create a new article
    async fn create(&self, article: &NewArticle) -> RepoResult<Article>;

    /// Atomically add one view and return the updated article
    async fn increment_views(&self, id: ArticleId) -> RepoResult<Option<Article>>;

    /// Delete an article; its comments are kept with a cleared reference
    async fn delete(&self, id: ArticleId) -> RepoResult<()>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Count comments on an article
    async fn count_by_article(&self, article_id: ArticleId) -> RepoResult<i64>;

    /// One page of an article's comments with author names, newest first
    async fn find_by_article(
        &self,
        article_id: ArticleId,
        page: PageRequest,
    ) -> RepoResult<Vec<CommentWithAuthor>>;

    /// Insert a comment and bump the article's comment counter in one transaction
    async fn create(&self, comment: &NewComment) -> RepoResult<Comment>;
}
