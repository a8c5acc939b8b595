//! Service context - dependency container for services
//!
//! Holds the repositories, cache stores and outbound gateways needed by services.

use std::sync::Arc;

use blog_cache::{SessionStore, SharedRedisPool, VerificationStore, VerificationTtls};
use blog_core::traits::{ArticleRepository, CategoryRepository, CommentRepository, UserRepository};
use blog_db::PgPool;

use crate::gateways::{CaptchaRenderer, SmsGateway};

use super::error::{ServiceError, ServiceResult};
use super::storage::MediaStorage;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - Redis session and verification-code stores
/// - The SMS gateway and captcha renderer
/// - Uploaded media storage
#[derive(Clone)]
pub struct ServiceContext {
    pool: PgPool,
    redis_pool: SharedRedisPool,

    user_repo: Arc<dyn UserRepository>,
    category_repo: Arc<dyn CategoryRepository>,
    article_repo: Arc<dyn ArticleRepository>,
    comment_repo: Arc<dyn CommentRepository>,

    session_store: SessionStore,
    verification_store: VerificationStore,

    sms_gateway: Arc<dyn SmsGateway>,
    captcha: Arc<dyn CaptchaRenderer>,
    storage: MediaStorage,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Pools ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the Redis connection pool
    pub fn redis_pool(&self) -> &SharedRedisPool {
        &self.redis_pool
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn category_repo(&self) -> &dyn CategoryRepository {
        self.category_repo.as_ref()
    }

    pub fn article_repo(&self) -> &dyn ArticleRepository {
        self.article_repo.as_ref()
    }

    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    // === Cache Stores ===

    /// Get the login session store
    pub fn session_store(&self) -> &SessionStore {
        &self.session_store
    }

    /// Get the captcha and SMS code store
    pub fn verification_store(&self) -> &VerificationStore {
        &self.verification_store
    }

    // === Gateways ===

    pub fn sms_gateway(&self) -> &dyn SmsGateway {
        self.sms_gateway.as_ref()
    }

    pub fn captcha(&self) -> &dyn CaptchaRenderer {
        self.captcha.as_ref()
    }

    // === Storage ===

    pub fn storage(&self) -> &MediaStorage {
        &self.storage
    }

    /// Public prefix of uploaded files
    pub fn media_url(&self) -> &str {
        self.storage.media_url()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("redis_pool", &"SharedRedisPool")
            .field("repositories", &"...")
            .field("session_ttl", &self.session_store.ttl_seconds())
            .field("storage", &self.storage)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<SharedRedisPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    category_repo: Option<Arc<dyn CategoryRepository>>,
    article_repo: Option<Arc<dyn ArticleRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    sms_gateway: Option<Arc<dyn SmsGateway>>,
    captcha: Option<Arc<dyn CaptchaRenderer>>,
    storage: Option<MediaStorage>,
    session_ttl_seconds: Option<u64>,
    verification_ttls: Option<VerificationTtls>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: SharedRedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn category_repo(mut self, repo: Arc<dyn CategoryRepository>) -> Self {
        self.category_repo = Some(repo);
        self
    }

    pub fn article_repo(mut self, repo: Arc<dyn ArticleRepository>) -> Self {
        self.article_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn sms_gateway(mut self, gateway: Arc<dyn SmsGateway>) -> Self {
        self.sms_gateway = Some(gateway);
        self
    }

    pub fn captcha(mut self, renderer: Arc<dyn CaptchaRenderer>) -> Self {
        self.captcha = Some(renderer);
        self
    }

    pub fn storage(mut self, storage: MediaStorage) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Server-side lifetime of login sessions
    pub fn session_ttl_seconds(mut self, ttl: u64) -> Self {
        self.session_ttl_seconds = Some(ttl);
        self
    }

    pub fn verification_ttls(mut self, ttls: VerificationTtls) -> Self {
        self.verification_ttls = Some(ttls);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
        }

        let pool = required(self.pool, "pool")?;
        let redis_pool = required(self.redis_pool, "redis_pool")?;

        let inner_pool = (*redis_pool).clone();
        let session_store = match self.session_ttl_seconds {
            Some(ttl) => SessionStore::with_ttl(inner_pool.clone(), ttl),
            None => SessionStore::new(inner_pool.clone()),
        };
        let verification_store = match self.verification_ttls {
            Some(ttls) => VerificationStore::with_ttls(inner_pool, ttls),
            None => VerificationStore::new(inner_pool),
        };

        Ok(ServiceContext {
            pool,
            redis_pool,
            user_repo: required(self.user_repo, "user_repo")?,
            category_repo: required(self.category_repo, "category_repo")?,
            article_repo: required(self.article_repo, "article_repo")?,
            comment_repo: required(self.comment_repo, "comment_repo")?,
            session_store,
            verification_store,
            sms_gateway: required(self.sms_gateway, "sms_gateway")?,
            captcha: required(self.captcha, "captcha")?,
            storage: required(self.storage, "storage")?,
        })
    }
}
