//! Home page handler

use axum::{
    extract::{Query, State},
    Json,
};
use blog_service::dto::{ArticleListQuery, ArticleListResponse};
use blog_service::ArticleService;

use crate::response::ApiResult;
use crate::state::AppState;

/// One page of a category's articles
///
/// GET /?cat_id=&page_num=&page_size=
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ArticleListQuery>,
) -> ApiResult<Json<ArticleListResponse>> {
    let response = ArticleService::new(state.service_context())
        .list(query)
        .await?;
    Ok(Json(response))
}
