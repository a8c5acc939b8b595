//! Login cookies
//!
//! `sessionid` carries the server-side session; `is_login` and `username`
//! are readable hints for the page header.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use blog_service::dto::SessionGrant;
use cookie::time::Duration;

pub const SESSION_COOKIE: &str = "sessionid";
pub const IS_LOGIN_COOKIE: &str = "is_login";
pub const USERNAME_COOKIE: &str = "username";

const USERNAME_MAX_AGE_DAYS: i64 = 30;

/// Set the cookies of a fresh login
///
/// Without `remember` the session and login flag are browser-session cookies.
pub fn login_cookies(jar: CookieJar, grant: &SessionGrant, ttl_seconds: u64, secure: bool) -> CookieJar {
    let max_age = grant
        .remember
        .then(|| Duration::seconds(i64::try_from(ttl_seconds).unwrap_or(i64::MAX)));

    let mut session = Cookie::build((SESSION_COOKIE, grant.session_id.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure);
    let mut is_login = Cookie::build((IS_LOGIN_COOKIE, "true"))
        .path("/")
        .same_site(SameSite::Lax)
        .secure(secure);
    if let Some(max_age) = max_age {
        session = session.max_age(max_age);
        is_login = is_login.max_age(max_age);
    }

    jar.add(session)
        .add(is_login)
        .add(username_cookie(&grant.username, secure))
}

/// `username` cookie, percent-encoded so any display name fits a header
pub fn username_cookie(username: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((USERNAME_COOKIE, urlencoding::encode(username).into_owned()))
        .path("/")
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::days(USERNAME_MAX_AGE_DAYS))
        .build()
}

/// Expire the session and login flag
pub fn clear_login_cookies(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
        .remove(Cookie::build(IS_LOGIN_COOKIE).path("/"))
}

/// Where to go after logging in
///
/// Only same-site absolute paths are followed; anything else falls back to `/`.
pub fn safe_next(next: Option<&str>) -> String {
    match next.map(str::trim) {
        Some(path)
            if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') =>
        {
            path.to_string()
        }
        _ => "/".to_string(),
    }
}
