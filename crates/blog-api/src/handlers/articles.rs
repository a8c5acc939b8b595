//! Article handlers
//!
//! Detail page, comment submission and the authoring page.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use blog_service::dto::{
    ArticleDetailQuery, ArticleDetailResponse, CommentForm, WriteBlogForm, WriteBlogResponse,
};
use blog_service::{ArticleService, CommentService};

use crate::extractors::{CurrentUser, FormInput, MaybeUser, MultipartForm};
use crate::response::{login_redirect, ApiResult, Found};
use crate::state::AppState;

/// Article detail with one page of comments
///
/// GET /detail?id=&page_num=&page_size=
pub async fn detail(
    State(state): State<AppState>,
    Query(query): Query<ArticleDetailQuery>,
) -> ApiResult<Json<ArticleDetailResponse>> {
    let response = ArticleService::new(state.service_context())
        .detail(query)
        .await?;
    Ok(Json(response))
}

/// Post a comment
///
/// POST /detail
pub async fn post_comment(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    FormInput(form): FormInput<CommentForm>,
) -> ApiResult<Response> {
    let Some(user) = user else {
        let next = format!("/detail?id={}", form.id.as_deref().unwrap_or_default().trim());
        return Ok(login_redirect(&next).into_response());
    };

    let article_id = CommentService::new(state.service_context())
        .create(&user, form)
        .await?;
    Ok(Found::to(format!("/detail?id={article_id}#comment")).into_response())
}

/// Authoring page
///
/// GET /writeblog
pub async fn write_page(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
) -> ApiResult<Json<WriteBlogResponse>> {
    let categories = ArticleService::new(state.service_context())
        .categories()
        .await?;
    Ok(Json(WriteBlogResponse { categories }))
}

/// Publish an article
///
/// POST /writeblog
pub async fn write(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    MultipartForm(form): MultipartForm<WriteBlogForm>,
) -> ApiResult<Found> {
    ArticleService::new(state.service_context())
        .create(&user, form)
        .await?;
    Ok(Found::to("/"))
}
