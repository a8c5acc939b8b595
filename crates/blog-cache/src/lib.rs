//! # blog-cache
//!
//! Redis layer for short-lived verification codes and login sessions.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Verification Codes**: Image captcha answers, SMS codes and the SMS send throttle
//! - **Sessions**: Opaque session ids mapped to the logged-in user
//!
//! ## Example
//!
//! ```ignore
//! use blog_cache::{RedisPool, RedisPoolConfig, SessionStore, VerificationStore};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let codes = VerificationStore::new(pool.clone());
//! codes.store_image_code("2f1c...", "K7QX").await?;
//!
//! let sessions = SessionStore::new(pool);
//! let session_id = sessions.create(user_id, true).await?;
//! ```

pub mod pool;
pub mod session;
pub mod verification;

// Re-export pool types
pub use pool::{
    create_shared_pool, RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool,
};

// Re-export session types
pub use session::{SessionData, SessionStore};

// Re-export verification types
pub use verification::{VerificationStore, VerificationTtls};
