//! Login sessions in Redis.
//!
//! Keys: `session:<id>` holds [`SessionData`], `user_sessions:<user_id>` is a
//! set of the user's live session ids so they can all be revoked at once.

use crate::pool::{RedisPool, RedisResult};
use blog_core::UserId;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

/// Key prefix for sessions
const SESSION_PREFIX: &str = "session:";

/// Key prefix for the per-user session index
const USER_SESSIONS_PREFIX: &str = "user_sessions:";

/// Default server-side session lifetime (14 days)
const DEFAULT_SESSION_TTL: u64 = 14 * 24 * 60 * 60;

/// Stored session data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    /// Logged-in user
    pub user_id: UserId,
    /// Whether the login asked to be remembered past the browser session
    pub remember: bool,
    /// Creation timestamp (Unix epoch seconds)
    pub created_at: i64,
}

impl SessionData {
    #[must_use]
    pub fn new(user_id: UserId, remember: bool) -> Self {
        Self {
            user_id,
            remember,
            created_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// Session store backing cookie logins
#[derive(Clone)]
pub struct SessionStore {
    pool: RedisPool,
    ttl_seconds: u64,
}

impl SessionStore {
    /// Create a new session store with the default lifetime
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self {
            pool,
            ttl_seconds: DEFAULT_SESSION_TTL,
        }
    }

    /// Create with custom TTL
    #[must_use]
    pub fn with_ttl(pool: RedisPool, ttl_seconds: u64) -> Self {
        Self { pool, ttl_seconds }
    }

    /// Server-side lifetime of a session in seconds
    #[must_use]
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    fn key(session_id: &str) -> String {
        format!("{SESSION_PREFIX}{session_id}")
    }

    fn user_key(user_id: UserId) -> String {
        format!("{USER_SESSIONS_PREFIX}{user_id}")
    }

    /// Start a session for a user and return its id
    pub async fn create(&self, user_id: UserId, remember: bool) -> RedisResult<String> {
        let session_id = uuid::Uuid::new_v4().simple().to_string();
        let data = SessionData::new(user_id, remember);
        self.pool
            .set(&Self::key(&session_id), &data, Some(self.ttl_seconds))
            .await?;

        let user_key = Self::user_key(user_id);
        let mut conn = self.pool.get().await?;
        conn.sadd::<_, _, ()>(&user_key, &session_id).await?;
        conn.expire::<_, ()>(&user_key, self.ttl_seconds as i64).await?;

        tracing::debug!(user_id = %user_id, remember, "Session created");

        Ok(session_id)
    }

    /// Look up a live session
    pub async fn get(&self, session_id: &str) -> RedisResult<Option<SessionData>> {
        if session_id.is_empty() {
            return Ok(None);
        }
        self.pool.get_value(&Self::key(session_id)).await
    }

    /// End a session (logout)
    pub async fn destroy(&self, session_id: &str) -> RedisResult<bool> {
        if let Some(data) = self.get(session_id).await? {
            let mut conn = self.pool.get().await?;
            conn.srem::<_, _, ()>(&Self::user_key(data.user_id), session_id)
                .await?;
        }

        let deleted = self.pool.delete(&Self::key(session_id)).await?;
        if deleted {
            tracing::debug!("Session destroyed");
        }
        Ok(deleted)
    }

    /// End every session of a user, e.g. after a password reset
    pub async fn destroy_all_for_user(&self, user_id: UserId) -> RedisResult<u32> {
        let user_key = Self::user_key(user_id);
        let mut conn = self.pool.get().await?;

        let session_ids: Vec<String> = conn.smembers(&user_key).await?;
        let count = session_ids.len() as u32;

        let keys: Vec<String> = session_ids.iter().map(|id| Self::key(id)).collect();
        self.pool.delete_many(&keys).await?;
        conn.del::<_, ()>(&user_key).await?;

        tracing::info!(user_id = %user_id, count, "Revoked all sessions for user");

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_data_creation() {
        let data = SessionData::new(UserId::new(42), true);
        assert_eq!(data.user_id, UserId::new(42));
        assert!(data.remember);
        assert!(data.created_at > 0);
    }

    #[test]
    fn test_key_generation() {
        assert_eq!(SessionStore::key("abc123"), "session:abc123");
        assert_eq!(SessionStore::user_key(UserId::new(7)), "user_sessions:7");
    }

    #[test]
    fn test_session_data_json_shape() {
        let data = SessionData {
            user_id: UserId::new(5),
            remember: false,
            created_at: 1_700_000_000,
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["user_id"], 5);
        assert_eq!(json["remember"], false);
    }
}
