//! Session extractors
//!
//! Resolve the `sessionid` cookie to the logged-in user.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use blog_core::User;
use blog_service::AuthService;

use crate::response::{login_redirect, ApiError, SESSION_COOKIE};
use crate::state::AppState;

/// The logged-in user; anonymous visitors are redirected to the login page
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// The logged-in user, if any
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

async fn resolve(parts: &Parts, state: &AppState) -> Result<Option<User>, ApiError> {
    let jar = CookieJar::from_headers(&parts.headers);
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Ok(None);
    };

    Ok(AuthService::new(state.service_context())
        .resolve_session(cookie.value())
        .await?)
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        match resolve(parts, &app_state).await {
            Ok(Some(user)) => Ok(Self(user)),
            Ok(None) => {
                let next = parts
                    .uri
                    .path_and_query()
                    .map_or("/", |pq| pq.as_str());
                Err(login_redirect(next).into_response())
            }
            Err(e) => Err(e.into_response()),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        resolve(parts, &app_state).await.map(Self)
    }
}
