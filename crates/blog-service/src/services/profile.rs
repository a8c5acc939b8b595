//! Profile service: the personal center page

use blog_core::User;
use tracing::{info, instrument};

use crate::dto::{ProfileResponse, UpdateProfileForm};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::storage::MediaKind;

pub struct ProfileService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProfileService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn view(&self, user: &User) -> ProfileResponse {
        ProfileResponse::from_user(user, self.ctx.media_url())
    }

    /// Apply a profile edit and return the saved user
    ///
    /// A missing username keeps the current one; a missing avatar keeps the old picture.
    #[instrument(skip(self, user, form), fields(user_id = %user.id))]
    pub async fn update(&self, mut user: User, form: UpdateProfileForm) -> ServiceResult<User> {
        const ACTION: &str = "Update";

        let update = form.validate_fields(&user.username, &user.user_desc)?;

        let avatar = match &update.avatar {
            Some(file) => Some(
                self.ctx
                    .storage()
                    .save(MediaKind::Avatar, file)
                    .await
                    .map_err(|e| e.or_retry_later(ACTION))?,
            ),
            None => None,
        };

        user.update_profile(update.username, update.user_desc, avatar);
        self.ctx
            .user_repo()
            .update_profile(&user)
            .await
            .map_err(|e| ServiceError::from(e).or_retry_later(ACTION))?;

        info!("Profile updated");
        Ok(user)
    }
}
