//! URL-encoded form extractor

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Form,
};
use serde::de::DeserializeOwned;

use crate::response::ApiError;

/// `application/x-www-form-urlencoded` body
///
/// Rejections become plain-text 400s. Field checks are left to the
/// service layer, which knows which message each missing field deserves.
#[derive(Debug, Clone)]
pub struct FormInput<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for FormInput<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        Ok(FormInput(value))
    }
}
