//! Personal center handlers

use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use blog_service::dto::{ProfileResponse, UpdateProfileForm};
use blog_service::ProfileService;

use crate::extractors::{CurrentUser, MultipartForm};
use crate::response::{username_cookie, ApiResult, Found};
use crate::state::AppState;

/// Profile of the logged-in user
///
/// GET /center
pub async fn center(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Json<ProfileResponse> {
    Json(ProfileService::new(state.service_context()).view(&user))
}

/// Edit username, bio and avatar
///
/// POST /center
pub async fn update_center(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    MultipartForm(form): MultipartForm<UpdateProfileForm>,
) -> ApiResult<(CookieJar, Found)> {
    let user = ProfileService::new(state.service_context())
        .update(user, form)
        .await?;

    let jar = jar.add(username_cookie(&user.username, state.cookie_secure()));
    Ok((jar, Found::to("/center")))
}
