//! Route definitions
//!
//! Page routes mirror the site's URLs; GET serves a page's context and POST
//! submits its form.

use axum::{routing::get, Router};

use crate::handlers::{articles, auth, health, home, users, verification};
use crate::state::AppState;

/// Create the page router (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(article_routes())
        .merge(auth_routes())
        .merge(verification_routes())
        .merge(user_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Listing, detail, comments and authoring
fn article_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/detail", get(articles::detail).post(articles::post_comment))
        .route("/writeblog", get(articles::write_page).post(articles::write))
}

/// Account routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route(
            "/forgetpassword",
            get(auth::forget_password_page).post(auth::forget_password),
        )
}

/// Captcha and SMS code routes
fn verification_routes() -> Router<AppState> {
    Router::new()
        .route("/imagecode", get(verification::image_code))
        .route("/smscode", get(verification::sms_code))
}

/// Personal center
fn user_routes() -> Router<AppState> {
    Router::new().route("/center", get(users::center).post(users::update_center))
}
