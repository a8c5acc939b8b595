//! Authentication service
//!
//! Handles registration, login, logout, password reset and resolving the
//! user behind a session cookie.

use blog_common::{hash_password, verify_password};
use blog_core::{DomainError, Mobile, NewUser, User, UserId};
use tracing::{info, instrument, warn};

use crate::dto::{ForgetPasswordForm, LoginForm, RegisterForm, SessionGrant};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new account and log it in
    #[instrument(skip(self, form))]
    pub async fn register(&self, form: RegisterForm) -> ServiceResult<SessionGrant> {
        const ACTION: &str = "Registration";

        let input = form.validate_fields()?;
        self.check_sms_code(&input.mobile, &input.sms_code, ACTION)
            .await?;

        let password_hash = hash_password(&input.password)
            .map_err(|e| ServiceError::from(e).or_retry_later(ACTION))?;

        let user = self
            .ctx
            .user_repo()
            .create(&NewUser::from_mobile(input.mobile.clone()), &password_hash)
            .await
            .map_err(|e| match e {
                DomainError::MobileAlreadyExists => ServiceError::validation(e.to_string()),
                other => ServiceError::from(other).or_retry_later(ACTION),
            })?;

        info!(user_id = %user.id, "User registered");

        // The code stays valid until the account exists
        if let Err(e) = self.ctx.verification_store().delete_sms_code(&input.mobile).await {
            warn!(error = %e, "Failed to delete used SMS code");
        }

        // A fresh registration behaves like a remembered login
        self.open_session(&user, true, ACTION).await
    }

    /// Log in with mobile and password
    #[instrument(skip(self, form))]
    pub async fn login(&self, form: LoginForm) -> ServiceResult<SessionGrant> {
        const ACTION: &str = "Login";

        let input = form.validate_fields()?;

        let user = self
            .ctx
            .user_repo()
            .find_by_mobile(&input.mobile)
            .await
            .map_err(|e| ServiceError::from(e).or_retry_later(ACTION))?
            .ok_or_else(|| {
                warn!("Login failed: unknown mobile");
                ServiceError::from(DomainError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await
            .map_err(|e| ServiceError::from(e).or_retry_later(ACTION))?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::from(DomainError::InvalidCredentials)
            })?;

        let is_valid = verify_password(&input.password, &password_hash)
            .map_err(|e| ServiceError::from(e).or_retry_later(ACTION))?;
        if !is_valid {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(DomainError::InvalidCredentials.into());
        }

        info!(user_id = %user.id, remember = input.remember, "User logged in");
        self.open_session(&user, input.remember, ACTION).await
    }

    /// End a session; unknown ids are ignored
    #[instrument(skip(self, session_id))]
    pub async fn logout(&self, session_id: &str) -> ServiceResult<()> {
        self.ctx.session_store().destroy(session_id).await?;
        Ok(())
    }

    /// Set a new password for a mobile, creating the account when there is none
    ///
    /// Every session of an existing account is revoked. The SMS code is left
    /// to expire, so resubmitting the same form gives the same result.
    #[instrument(skip(self, form))]
    pub async fn reset_password(&self, form: ForgetPasswordForm) -> ServiceResult<UserId> {
        const ACTION: &str = "Password reset";

        let input = form.validate_fields()?;
        self.check_sms_code(&input.mobile, &input.sms_code, ACTION)
            .await?;

        let password_hash = hash_password(&input.password)
            .map_err(|e| ServiceError::from(e).or_retry_later(ACTION))?;

        let existing = self
            .ctx
            .user_repo()
            .find_by_mobile(&input.mobile)
            .await
            .map_err(|e| ServiceError::from(e).or_retry_later(ACTION))?;

        let user_id = match existing {
            Some(user) => {
                self.ctx
                    .user_repo()
                    .update_password(user.id, &password_hash)
                    .await
                    .map_err(|e| ServiceError::from(e).or_retry_later(ACTION))?;

                if let Err(e) = self.ctx.session_store().destroy_all_for_user(user.id).await {
                    warn!(user_id = %user.id, error = %e, "Failed to revoke sessions after password reset");
                }
                info!(user_id = %user.id, "Password reset");
                user.id
            }
            None => {
                let user = self
                    .ctx
                    .user_repo()
                    .create(&NewUser::from_mobile(input.mobile), &password_hash)
                    .await
                    .map_err(|e| ServiceError::from(e).or_retry_later(ACTION))?;
                info!(user_id = %user.id, "Account created by password reset");
                user.id
            }
        };

        Ok(user_id)
    }

    /// The user a session cookie belongs to, if the session is still live
    #[instrument(skip(self, session_id))]
    pub async fn resolve_session(&self, session_id: &str) -> ServiceResult<Option<User>> {
        let Some(session) = self.ctx.session_store().get(session_id).await? else {
            return Ok(None);
        };

        let user = self.ctx.user_repo().find_by_id(session.user_id).await?;
        if user.is_none() {
            // Account was deleted under a live session
            self.ctx.session_store().destroy(session_id).await?;
        }
        Ok(user)
    }

    /// Compare a submitted SMS code with the one texted to `mobile`
    async fn check_sms_code(&self, mobile: &Mobile, submitted: &str, action: &str) -> ServiceResult<()> {
        let stored = self
            .ctx
            .verification_store()
            .get_sms_code(mobile)
            .await
            .map_err(|e| ServiceError::from(e).or_retry_later(action))?
            .ok_or(DomainError::VerificationCodeExpired)?;

        if stored != submitted {
            return Err(DomainError::VerificationCodeMismatch.into());
        }
        Ok(())
    }

    async fn open_session(&self, user: &User, remember: bool, action: &str) -> ServiceResult<SessionGrant> {
        let session_id = self
            .ctx
            .session_store()
            .create(user.id, remember)
            .await
            .map_err(|e| ServiceError::from(e).or_retry_later(action))?;

        Ok(SessionGrant {
            session_id,
            user_id: user.id,
            username: user.username.clone(),
            remember,
        })
    }
}
