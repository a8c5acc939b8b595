//! Verification code storage.
//!
//! Provides Redis-backed storage for:
//! - Image captcha answers (`img:<uuid>`)
//! - SMS codes (`sms:<mobile>`)
//! - The per-mobile SMS send throttle (`send_flag:<mobile>`)

mod codes;

pub use codes::{VerificationStore, VerificationTtls};
