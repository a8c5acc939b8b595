//! Route handlers
//!
//! All HTTP request handlers organized by page.

pub mod articles;
pub mod auth;
pub mod health;
pub mod home;
pub mod users;
pub mod verification;
