//! User entity - a mobile-authenticated account

use chrono::{DateTime, Utc};

use crate::value_objects::{Mobile, UserId};

/// Maximum length of a user's self description
pub const MAX_USER_DESC_LEN: usize = 500;

/// Maximum length of a display name
pub const MAX_USERNAME_LEN: usize = 150;

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub mobile: Mobile,
    pub username: String,
    /// Relative path of the uploaded avatar under the media root
    pub avatar: Option<String>,
    pub user_desc: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Public URL of the avatar, if one was uploaded
    pub fn avatar_url(&self, media_url: &str) -> Option<String> {
        self.avatar
            .as_deref()
            .map(|path| format!("{}/{}", media_url.trim_end_matches('/'), path))
    }

    /// Apply a profile edit and bump `updated_at`
    pub fn update_profile(&mut self, username: String, user_desc: String, avatar: Option<String>) {
        self.username = username;
        self.user_desc = user_desc;
        if avatar.is_some() {
            self.avatar = avatar;
        }
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Values needed to insert a new user; the id is assigned by the database
#[derive(Debug, Clone)]
pub struct NewUser {
    pub mobile: Mobile,
    pub username: String,
}

impl NewUser {
    /// New accounts are named after their mobile number until the owner edits the profile
    pub fn from_mobile(mobile: Mobile) -> Self {
        let username = mobile.to_string();
        Self { mobile, username }
    }
}
