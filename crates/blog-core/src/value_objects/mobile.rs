//! Mobile number and password format rules
//!
//! Accounts are keyed by an 11-digit mainland mobile number: a leading `1`,
//! then a digit in `3..=9`, then nine more digits.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

static MOBILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^1[3-9][0-9]{9}$").expect("valid mobile regex"));

static PASSWORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z]{8,20}$").expect("valid password regex"));

/// A validated mobile number, the login identity of a user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Mobile(String);

impl Mobile {
    /// Parse and validate a mobile number
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        if MOBILE_RE.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(DomainError::InvalidMobile)
        }
    }

    /// Wrap a value read back from storage, where only parsed numbers are ever written
    pub fn from_stored(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Mobile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Mobile {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Mobile {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Mobile> for String {
    fn from(mobile: Mobile) -> Self {
        mobile.0
    }
}

/// Check a plaintext password against the 8-20 alphanumeric rule
pub fn validate_password_format(password: &str) -> Result<(), DomainError> {
    if PASSWORD_RE.is_match(password) {
        Ok(())
    } else {
        Err(DomainError::InvalidPassword)
    }
}
