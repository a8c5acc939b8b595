//! Authentication handlers
//!
//! Registration, login, logout and password reset. Each page answers GET
//! with its context and POST with a redirect.

use axum::{
    extract::{Query, State},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use blog_service::dto::{
    ForgetPasswordForm, FormPageResponse, LoginForm, NextQuery, RegisterForm,
};
use blog_service::AuthService;
use tracing::warn;

use crate::extractors::FormInput;
use crate::response::{
    clear_login_cookies, login_cookies, safe_next, ApiResult, Found, SESSION_COOKIE,
};
use crate::state::AppState;

/// Registration page
///
/// GET /register
pub async fn register_page() -> Json<FormPageResponse> {
    Json(FormPageResponse::new("register"))
}

/// Create an account and log it in
///
/// POST /register
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    FormInput(form): FormInput<RegisterForm>,
) -> ApiResult<(CookieJar, Found)> {
    let grant = AuthService::new(state.service_context())
        .register(form)
        .await?;

    let jar = login_cookies(jar, &grant, state.session_ttl_seconds(), state.cookie_secure());
    Ok((jar, Found::to("/")))
}

/// Login page
///
/// GET /login
pub async fn login_page(Query(query): Query<NextQuery>) -> Json<FormPageResponse> {
    Json(FormPageResponse::new("login").with_next(query.next))
}

/// Log in with mobile and password
///
/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Query(query): Query<NextQuery>,
    jar: CookieJar,
    FormInput(form): FormInput<LoginForm>,
) -> ApiResult<(CookieJar, Found)> {
    // A hidden form field wins over the query string
    let next = safe_next(form.next.as_deref().or(query.next.as_deref()));

    let grant = AuthService::new(state.service_context()).login(form).await?;

    let jar = login_cookies(jar, &grant, state.session_ttl_seconds(), state.cookie_secure());
    Ok((jar, Found::to(next)))
}

/// Log out
///
/// GET /logout
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Found) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if let Err(e) = AuthService::new(state.service_context())
            .logout(cookie.value())
            .await
        {
            warn!(error = %e, "Failed to destroy session");
        }
    }

    (clear_login_cookies(jar), Found::to("/"))
}

/// Password reset page
///
/// GET /forgetpassword
pub async fn forget_password_page() -> Json<FormPageResponse> {
    Json(FormPageResponse::new("forget_password"))
}

/// Set a new password, creating the account if the mobile is new
///
/// POST /forgetpassword
pub async fn forget_password(
    State(state): State<AppState>,
    FormInput(form): FormInput<ForgetPasswordForm>,
) -> ApiResult<Found> {
    AuthService::new(state.service_context())
        .reset_password(form)
        .await?;
    Ok(Found::to("/login"))
}
