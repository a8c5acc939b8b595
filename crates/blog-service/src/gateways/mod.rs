//! Outbound collaborators behind narrow traits
//!
//! - [`SmsGateway`]: delivers verification codes to phones
//! - [`CaptchaRenderer`]: draws the image captcha shown before an SMS is sent

mod captcha;
mod sms;

pub use captcha::{BitmapCaptcha, Captcha, CaptchaError, CaptchaRenderer, CAPTCHA_ALPHABET};
pub use sms::{HttpSmsGateway, LoggingSmsGateway, SmsError, SmsGateway};
