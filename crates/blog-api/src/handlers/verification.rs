//! Verification code handlers
//!
//! The captcha comes back as an image; the SMS endpoint answers with the
//! `{code, errmsg}` envelope read by the registration page script.

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use blog_service::dto::{ImageCodeQuery, RetResponse, SmsCodeQuery};
use blog_service::VerificationService;
use tracing::error;

use crate::response::ApiResult;
use crate::state::AppState;

/// Captcha image for the client-generated `uuid`
///
/// GET /imagecode?uuid=
pub async fn image_code(
    State(state): State<AppState>,
    Query(query): Query<ImageCodeQuery>,
) -> ApiResult<impl IntoResponse> {
    let captcha = VerificationService::new(state.service_context())
        .image_code(query)
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, captcha.content_type),
            (header::CACHE_CONTROL, "no-store"),
        ],
        captcha.image,
    ))
}

/// Send an SMS code once the captcha checks out
///
/// GET /smscode?mobile=&image_code=&uuid=
pub async fn sms_code(
    State(state): State<AppState>,
    Query(query): Query<SmsCodeQuery>,
) -> Json<RetResponse> {
    match VerificationService::new(state.service_context())
        .send_sms_code(query)
        .await
    {
        Ok(()) => Json(RetResponse::ok("SMS code sent")),
        Err(e) => {
            if e.is_infrastructure() {
                error!(error = %e, "SMS code request failed");
            }
            Json(RetResponse::from_error(&e))
        }
    }
}
