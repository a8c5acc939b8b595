//! Verification service
//!
//! Issues image captchas and SMS codes. An SMS code is only sent after the
//! caller proves it read the captcha tied to its `uuid`.

use blog_core::DomainError;
use rand::Rng;
use tracing::{error, info, instrument, warn};

use crate::dto::{ImageCodeQuery, SmsCodeQuery};
use crate::gateways::Captcha;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Number of digits in an SMS code
pub const SMS_CODE_LEN: usize = 6;

/// A zero-padded random SMS code
pub fn generate_sms_code(rng: &mut impl Rng) -> String {
    format!("{:0width$}", rng.gen_range(0..1_000_000u32), width = SMS_CODE_LEN)
}

/// Captcha answers are compared without regard to case
pub fn image_code_matches(expected: &str, submitted: &str) -> bool {
    expected.eq_ignore_ascii_case(submitted.trim())
}

/// Verification service
pub struct VerificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VerificationService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Render a captcha and remember its answer under the client's uuid
    #[instrument(skip(self, query))]
    pub async fn image_code(&self, query: ImageCodeQuery) -> ServiceResult<Captcha> {
        let uuid = query
            .uuid
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ServiceError::validation("Invalid request parameters"))?;

        let captcha = self
            .ctx
            .captcha()
            .generate()
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        self.ctx
            .verification_store()
            .store_image_code(&uuid, &captcha.text)
            .await?;

        Ok(captcha)
    }

    /// Check the captcha and send a fresh SMS code to the mobile
    #[instrument(skip(self, query))]
    pub async fn send_sms_code(&self, query: SmsCodeQuery) -> ServiceResult<()> {
        let input = query.validate_fields()?;
        let store = self.ctx.verification_store();

        // One attempt per captcha: the answer is gone after this read
        let expected = store
            .take_image_code(&input.uuid)
            .await?
            .ok_or(DomainError::VerificationCodeExpired)?;
        if !image_code_matches(&expected, &input.image_code) {
            return Err(DomainError::VerificationCodeMismatch.into());
        }

        if !store.try_mark_sms_sent(&input.mobile).await? {
            warn!("SMS code requested again inside the send interval");
            return Err(ServiceError::Throttled);
        }

        let code = generate_sms_code(&mut rand::thread_rng());
        store.store_sms_code(&input.mobile, &code).await?;

        let ttl_minutes = store.ttls().code_seconds / 60;
        if let Err(e) = self
            .ctx
            .sms_gateway()
            .send_code(&input.mobile, &code, ttl_minutes)
            .await
        {
            error!(error = %e, "SMS delivery failed");
            // Let the caller retry straight away
            if let Err(e) = store.clear_sms_sent(&input.mobile).await {
                warn!(error = %e, "Failed to clear SMS send flag");
            }
            return Err(ServiceError::Failed(
                "Sending the SMS code failed, please try again later".to_string(),
            ));
        }

        info!("SMS code sent");
        Ok(())
    }
}
