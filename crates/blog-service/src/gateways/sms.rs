//! SMS delivery

use async_trait::async_trait;
use blog_core::Mobile;
use serde::Serialize;
use tracing::{info, instrument};

/// SMS delivery errors
#[derive(Debug, thiserror::Error)]
pub enum SmsError {
    #[error("SMS request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("SMS provider rejected the message with status {0}")]
    Rejected(u16),
}

/// Sends a verification code to a phone
#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// Deliver `code`, telling the recipient it is valid for `ttl_minutes`
    async fn send_code(&self, mobile: &Mobile, code: &str, ttl_minutes: u64) -> Result<(), SmsError>;
}

/// Writes codes to the log instead of sending them (local development)
#[derive(Debug, Clone, Default)]
pub struct LoggingSmsGateway;

#[async_trait]
impl SmsGateway for LoggingSmsGateway {
    async fn send_code(&self, mobile: &Mobile, code: &str, ttl_minutes: u64) -> Result<(), SmsError> {
        info!(mobile = %mobile, code, ttl_minutes, "SMS code issued (not delivered, no gateway configured)");
        Ok(())
    }
}

#[derive(Serialize)]
struct SendCodePayload<'a> {
    mobile: &'a str,
    code: &'a str,
    ttl_minutes: u64,
}

/// Posts codes as JSON to an HTTP SMS provider
#[derive(Debug, Clone)]
pub struct HttpSmsGateway {
    client: reqwest::Client,
    url: String,
}

impl HttpSmsGateway {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl SmsGateway for HttpSmsGateway {
    #[instrument(skip(self, code), fields(mobile = %mobile))]
    async fn send_code(&self, mobile: &Mobile, code: &str, ttl_minutes: u64) -> Result<(), SmsError> {
        let response = self
            .client
            .post(&self.url)
            .json(&SendCodePayload {
                mobile: mobile.as_str(),
                code,
                ttl_minutes,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SmsError::Rejected(status.as_u16()));
        }
        Ok(())
    }
}
