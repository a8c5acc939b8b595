//! Axum extractors for request handling
//!
//! Custom extractors for the login session and form bodies.

mod form;
mod multipart;
mod session;

pub use form::FormInput;
pub use multipart::{MultipartFields, MultipartForm};
pub use session::{CurrentUser, MaybeUser};
