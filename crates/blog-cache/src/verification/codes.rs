//! Image and SMS verification codes in Redis.

use crate::pool::{RedisPool, RedisResult};
use blog_core::Mobile;

const IMAGE_CODE_PREFIX: &str = "img:";
const SMS_CODE_PREFIX: &str = "sms:";
const SEND_FLAG_PREFIX: &str = "send_flag:";

/// Lifetimes of the keys written by [`VerificationStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationTtls {
    /// Lifetime of image and SMS codes
    pub code_seconds: u64,
    /// Minimum gap between two SMS sends to one mobile
    pub send_interval_seconds: u64,
}

impl Default for VerificationTtls {
    fn default() -> Self {
        Self {
            code_seconds: 300,
            send_interval_seconds: 60,
        }
    }
}

impl From<&blog_common::VerificationConfig> for VerificationTtls {
    fn from(config: &blog_common::VerificationConfig) -> Self {
        Self {
            code_seconds: config.code_ttl_seconds,
            send_interval_seconds: config.sms_send_interval_seconds,
        }
    }
}

/// Store for captcha answers and SMS codes
#[derive(Clone)]
pub struct VerificationStore {
    pool: RedisPool,
    ttls: VerificationTtls,
}

impl VerificationStore {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self::with_ttls(pool, VerificationTtls::default())
    }

    #[must_use]
    pub fn with_ttls(pool: RedisPool, ttls: VerificationTtls) -> Self {
        Self { pool, ttls }
    }

    #[must_use]
    pub fn ttls(&self) -> VerificationTtls {
        self.ttls
    }

    fn image_key(uuid: &str) -> String {
        format!("{IMAGE_CODE_PREFIX}{uuid}")
    }

    fn sms_key(mobile: &Mobile) -> String {
        format!("{SMS_CODE_PREFIX}{mobile}")
    }

    fn send_flag_key(mobile: &Mobile) -> String {
        format!("{SEND_FLAG_PREFIX}{mobile}")
    }

    /// Remember the answer of a captcha issued to client `uuid`
    pub async fn store_image_code(&self, uuid: &str, code: &str) -> RedisResult<()> {
        self.pool
            .set_raw(&Self::image_key(uuid), code, Some(self.ttls.code_seconds))
            .await
    }

    /// Fetch and invalidate a captcha answer; each captcha is good for one attempt
    pub async fn take_image_code(&self, uuid: &str) -> RedisResult<Option<String>> {
        self.pool.take_raw(&Self::image_key(uuid)).await
    }

    /// Remember the SMS code sent to `mobile`
    pub async fn store_sms_code(&self, mobile: &Mobile, code: &str) -> RedisResult<()> {
        self.pool
            .set_raw(&Self::sms_key(mobile), code, Some(self.ttls.code_seconds))
            .await
    }

    /// Current SMS code for `mobile`, if one is still live
    pub async fn get_sms_code(&self, mobile: &Mobile) -> RedisResult<Option<String>> {
        self.pool.get_raw(&Self::sms_key(mobile)).await
    }

    /// Drop a used SMS code
    pub async fn delete_sms_code(&self, mobile: &Mobile) -> RedisResult<bool> {
        self.pool.delete(&Self::sms_key(mobile)).await
    }

    /// Claim the send slot for `mobile`; `false` means a code went out too recently
    pub async fn try_mark_sms_sent(&self, mobile: &Mobile) -> RedisResult<bool> {
        if self.ttls.send_interval_seconds == 0 {
            return Ok(true);
        }
        self.pool
            .set_if_absent(
                &Self::send_flag_key(mobile),
                "1",
                self.ttls.send_interval_seconds,
            )
            .await
    }

    /// Release the send slot, used when the SMS could not be delivered
    pub async fn clear_sms_sent(&self, mobile: &Mobile) -> RedisResult<bool> {
        self.pool.delete(&Self::send_flag_key(mobile)).await
    }
}
