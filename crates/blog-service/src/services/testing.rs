//! In-memory repositories for service unit tests
//!
//! Pools are created lazily and never connect, so only code paths that stay
//! clear of Redis can be exercised here. The Redis-backed flows are covered
//! by the end-to-end tests.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use blog_cache::{create_shared_pool, RedisPoolConfig};
use blog_core::traits::{ArticleRepository, CategoryRepository, CommentRepository, UserRepository};
use blog_core::{
    Article, ArticleCategory, ArticleId, CategoryId, Comment, CommentId, CommentWithAuthor,
    DomainError, Mobile, NewArticle, NewComment, NewUser, PageRequest, RepoResult, User, UserId,
};
use blog_db::PgPool;
use chrono::{Duration, Utc};

use crate::gateways::{BitmapCaptcha, LoggingSmsGateway};

use super::context::{ServiceContext, ServiceContextBuilder};
use super::storage::MediaStorage;

#[derive(Default)]
struct State {
    next_id: i64,
    users: Vec<(User, String)>,
    categories: Vec<ArticleCategory>,
    articles: Vec<Article>,
    comments: Vec<Comment>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Clone, Default)]
struct Memory(Arc<Mutex<State>>);

impl Memory {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.0.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

fn page<T: Clone>(items: &[T], request: PageRequest) -> Vec<T> {
    items
        .iter()
        .skip(request.offset() as usize)
        .take(request.limit() as usize)
        .cloned()
        .collect()
}

#[async_trait]
impl UserRepository for Memory {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.lock().users.iter().find(|(u, _)| u.id == id).map(|(u, _)| u.clone()))
    }

    async fn find_by_mobile(&self, mobile: &Mobile) -> RepoResult<Option<User>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|(u, _)| &u.mobile == mobile)
            .map(|(u, _)| u.clone()))
    }

    async fn mobile_exists(&self, mobile: &Mobile) -> RepoResult<bool> {
        Ok(self.find_by_mobile(mobile).await?.is_some())
    }

    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User> {
        let mut state = self.lock();
        if state.users.iter().any(|(u, _)| u.mobile == user.mobile) {
            return Err(DomainError::MobileAlreadyExists);
        }
        let now = Utc::now();
        let created = User {
            id: UserId::new(state.next_id()),
            mobile: user.mobile.clone(),
            username: user.username.clone(),
            avatar: None,
            user_desc: String::new(),
            created_at: now,
            updated_at: now,
        };
        state.users.push((created.clone(), password_hash.to_string()));
        Ok(created)
    }

    async fn update_profile(&self, user: &User) -> RepoResult<()> {
        let mut state = self.lock();
        let entry = state
            .users
            .iter_mut()
            .find(|(u, _)| u.id == user.id)
            .ok_or(DomainError::UserNotFound(user.id))?;
        entry.0 = user.clone();
        Ok(())
    }

    async fn delete(&self, id: UserId) -> RepoResult<()> {
        self.lock().users.retain(|(u, _)| u.id != id);
        Ok(())
    }

    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        Ok(self.lock().users.iter().find(|(u, _)| u.id == id).map(|(_, h)| h.clone()))
    }

    async fn update_password(&self, id: UserId, password_hash: &str) -> RepoResult<()> {
        let mut state = self.lock();
        let entry = state
            .users
            .iter_mut()
            .find(|(u, _)| u.id == id)
            .ok_or(DomainError::UserNotFound(id))?;
        entry.1 = password_hash.to_string();
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for Memory {
    async fn find_all(&self) -> RepoResult<Vec<ArticleCategory>> {
        Ok(self.lock().categories.clone())
    }

    async fn find_by_id(&self, id: CategoryId) -> RepoResult<Option<ArticleCategory>> {
        Ok(self.lock().categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_first(&self) -> RepoResult<Option<ArticleCategory>> {
        Ok(self.lock().categories.first().cloned())
    }

    async fn create(&self, title: &str) -> RepoResult<ArticleCategory> {
        let mut state = self.lock();
        let category = ArticleCategory {
            id: CategoryId::new(state.next_id()),
            title: title.to_string(),
            created_at: Utc::now(),
        };
        state.categories.push(category.clone());
        Ok(category)
    }

    async fn delete(&self, id: CategoryId) -> RepoResult<()> {
        let mut state = self.lock();
        state.categories.retain(|c| c.id != id);
        state.articles.retain(|a| a.category_id != Some(id));
        Ok(())
    }
}

#[async_trait]
impl ArticleRepository for Memory {
    async fn find_by_id(&self, id: ArticleId) -> RepoResult<Option<Article>> {
        Ok(self.lock().articles.iter().find(|a| a.id == id).cloned())
    }

    async fn count_by_category(&self, category_id: CategoryId) -> RepoResult<i64> {
        let state = self.lock();
        Ok(state
            .articles
            .iter()
            .filter(|a| a.category_id == Some(category_id))
            .count() as i64)
    }

    async fn find_by_category(
        &self,
        category_id: CategoryId,
        request: PageRequest,
    ) -> RepoResult<Vec<Article>> {
        let state = self.lock();
        let mut matching: Vec<Article> = state
            .articles
            .iter()
            .filter(|a| a.category_id == Some(category_id))
            .cloned()
            .collect();
        matching.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(page(&matching, request))
    }

    async fn find_hot(&self, limit: i64) -> RepoResult<Vec<Article>> {
        let mut all = self.lock().articles.clone();
        all.sort_by(|a, b| b.total_views.cmp(&a.total_views));
        all.truncate(limit as usize);
        Ok(all)
    }

    async fn create(&self, article: &NewArticle) -> RepoResult<Article> {
        let mut state = self.lock();
        if !state.categories.iter().any(|c| c.id == article.category_id) {
            return Err(DomainError::CategoryNotFound(article.category_id));
        }
        let id = state.next_id();
        // Strictly increasing timestamps keep newest-first ordering deterministic
        let created_at = Utc::now() + Duration::seconds(id);
        let created = Article {
            id: ArticleId::new(id),
            author_id: article.author_id,
            category_id: Some(article.category_id),
            avatar: article.avatar.clone(),
            tags: article.tags.clone(),
            title: article.title.clone(),
            summary: article.summary.clone(),
            content: article.content.clone(),
            total_views: 0,
            comments_count: 0,
            created_at,
            updated_at: created_at,
        };
        state.articles.push(created.clone());
        Ok(created)
    }

    async fn increment_views(&self, id: ArticleId) -> RepoResult<Option<Article>> {
        let mut state = self.lock();
        Ok(state.articles.iter_mut().find(|a| a.id == id).map(|a| {
            a.record_view();
            a.clone()
        }))
    }

    async fn delete(&self, id: ArticleId) -> RepoResult<()> {
        self.lock().articles.retain(|a| a.id != id);
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for Memory {
    async fn count_by_article(&self, article_id: ArticleId) -> RepoResult<i64> {
        let state = self.lock();
        Ok(state
            .comments
            .iter()
            .filter(|c| c.article_id == Some(article_id))
            .count() as i64)
    }

    async fn find_by_article(
        &self,
        article_id: ArticleId,
        request: PageRequest,
    ) -> RepoResult<Vec<CommentWithAuthor>> {
        let state = self.lock();
        let with_authors: Vec<CommentWithAuthor> = state
            .comments
            .iter()
            .rev()
            .filter(|c| c.article_id == Some(article_id))
            .map(|c| {
                let author = state
                    .users
                    .iter()
                    .find(|(u, _)| Some(u.id) == c.user_id)
                    .map(|(u, _)| u);
                CommentWithAuthor {
                    comment: c.clone(),
                    author_name: author.map(|u| u.username.clone()),
                    author_avatar: author.and_then(|u| u.avatar.clone()),
                }
            })
            .collect();
        Ok(page(&with_authors, request))
    }

    async fn create(&self, comment: &NewComment) -> RepoResult<Comment> {
        let mut state = self.lock();
        let id = state.next_id();
        let article = state
            .articles
            .iter_mut()
            .find(|a| a.id == comment.article_id)
            .ok_or(DomainError::ArticleNotFound(comment.article_id))?;
        article.record_comment();

        let created = Comment {
            id: CommentId::new(id),
            content: comment.content.clone(),
            article_id: Some(comment.article_id),
            user_id: Some(comment.user_id),
            created_at: Utc::now(),
        };
        state.comments.push(created.clone());
        Ok(created)
    }
}

/// A [`ServiceContext`] over in-memory repositories and a scratch media directory
pub(crate) struct TestContext {
    pub ctx: ServiceContext,
    memory: Memory,
    media_root: PathBuf,
}

impl TestContext {
    /// Must be called inside a Tokio runtime
    pub fn new() -> Self {
        let memory = Memory::default();
        let media_root =
            std::env::temp_dir().join(format!("blog-service-{}", uuid::Uuid::new_v4().simple()));

        let pool = PgPool::connect_lazy("postgres://localhost/unused").unwrap();
        let redis_pool = create_shared_pool(RedisPoolConfig {
            url: "redis://127.0.0.1:1".to_string(),
            max_connections: 1,
        })
        .unwrap();

        let ctx = ServiceContextBuilder::new()
            .pool(pool)
            .redis_pool(redis_pool)
            .user_repo(Arc::new(memory.clone()))
            .category_repo(Arc::new(memory.clone()))
            .article_repo(Arc::new(memory.clone()))
            .comment_repo(Arc::new(memory.clone()))
            .sms_gateway(Arc::new(LoggingSmsGateway))
            .captcha(Arc::new(BitmapCaptcha))
            .storage(MediaStorage::new(&media_root, "/media", 1024 * 1024))
            .build()
            .unwrap();

        Self {
            ctx,
            memory,
            media_root,
        }
    }

    pub fn media_root(&self) -> &Path {
        &self.media_root
    }

    pub fn user(&self, mobile: &str) -> User {
        let mut state = self.memory.lock();
        let now = Utc::now();
        let user = User {
            id: UserId::new(state.next_id()),
            mobile: Mobile::parse(mobile).unwrap(),
            username: mobile.to_string(),
            avatar: None,
            user_desc: String::new(),
            created_at: now,
            updated_at: now,
        };
        state.users.push((user.clone(), "hash".to_string()));
        user
    }

    pub fn save_user(&self, user: &User) {
        let mut state = self.memory.lock();
        if let Some(entry) = state.users.iter_mut().find(|(u, _)| u.id == user.id) {
            entry.0 = user.clone();
        }
    }

    pub fn stored_user(&self, id: UserId) -> User {
        let state = self.memory.lock();
        state.users.iter().find(|(u, _)| u.id == id).map(|(u, _)| u.clone()).unwrap()
    }

    pub fn category(&self, title: &str) -> ArticleCategory {
        let mut state = self.memory.lock();
        let category = ArticleCategory {
            id: CategoryId::new(state.next_id()),
            title: title.to_string(),
            created_at: Utc::now(),
        };
        state.categories.push(category.clone());
        category
    }

    pub fn article(&self, author: &User, category: &ArticleCategory, title: &str) -> Article {
        let mut state = self.memory.lock();
        let id = state.next_id();
        let created_at = Utc::now() + Duration::seconds(id);
        let article = Article {
            id: ArticleId::new(id),
            author_id: author.id,
            category_id: Some(category.id),
            avatar: None,
            tags: String::new(),
            title: title.to_string(),
            summary: "summary".to_string(),
            content: "content".to_string(),
            total_views: 0,
            comments_count: 0,
            created_at,
            updated_at: created_at,
        };
        state.articles.push(article.clone());
        article
    }

    pub fn stored_article(&self, id: ArticleId) -> Article {
        let state = self.memory.lock();
        state.articles.iter().find(|a| a.id == id).cloned().unwrap()
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.media_root);
    }
}
