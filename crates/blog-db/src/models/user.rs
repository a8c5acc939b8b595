//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for users table
///
/// `password_hash` is deliberately left out; it is only read through
/// `UserRepository::get_password_hash`.
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub mobile: String,
    pub username: String,
    pub avatar: Option<String>,
    pub user_desc: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
