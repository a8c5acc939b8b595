//! User entity <-> model mapper

use blog_core::entities::User;
use blog_core::value_objects::{Mobile, UserId};

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::new(model.id),
            mobile: Mobile::from_stored(model.mobile),
            username: model.username,
            avatar: model.avatar,
            user_desc: model.user_desc,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Values written by a profile update
pub struct UserUpdate<'a> {
    pub id: i64,
    pub username: &'a str,
    pub avatar: Option<&'a str>,
    pub user_desc: &'a str,
}

impl<'a> UserUpdate<'a> {
    pub fn new(user: &'a User) -> Self {
        Self {
            id: user.id.into_inner(),
            username: &user.username,
            avatar: user.avatar.as_deref(),
            user_desc: &user.user_desc,
        }
    }
}
