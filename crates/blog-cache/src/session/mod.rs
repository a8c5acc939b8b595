//! Login session storage.
//!
//! A session is an opaque random id handed to the browser in a cookie; the
//! user it belongs to lives only in Redis.

mod login_session;

pub use login_session::{SessionData, SessionStore};
