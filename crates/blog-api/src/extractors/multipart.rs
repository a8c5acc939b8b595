//! Multipart form extractor
//!
//! Collects every part of a `multipart/form-data` body, then hands the
//! fields to the target form type.

use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
};
use blog_service::dto::{UpdateProfileForm, UploadedFile, WriteBlogForm};

use crate::response::ApiError;

/// Text and file parts of a multipart body, keyed by field name
#[derive(Debug, Default)]
pub struct MultipartFields {
    texts: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl MultipartFields {
    pub fn insert_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.texts.insert(name.into(), value.into());
    }

    pub fn insert_file(&mut self, name: impl Into<String>, file: UploadedFile) {
        self.files.insert(name.into(), file);
    }

    /// Take a text field, trying each name in turn
    pub fn text(&mut self, names: &[&str]) -> Option<String> {
        names.iter().find_map(|name| self.texts.remove(*name))
    }

    pub fn file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }
}

impl From<MultipartFields> for WriteBlogForm {
    fn from(mut fields: MultipartFields) -> Self {
        Self {
            avatar: fields.file("avatar"),
            title: fields.text(&["title"]),
            category_id: fields.text(&["category_id", "category"]),
            tags: fields.text(&["tags"]),
            // The authoring page has always posted the summary as `sumary`
            summary: fields.text(&["sumary", "summary"]),
            content: fields.text(&["content"]),
        }
    }
}

impl From<MultipartFields> for UpdateProfileForm {
    fn from(mut fields: MultipartFields) -> Self {
        Self {
            username: fields.text(&["username"]),
            user_desc: fields.text(&["user_desc", "desc"]),
            avatar: fields.file("avatar"),
        }
    }
}

/// Multipart body collected into `T`
#[derive(Debug)]
pub struct MultipartForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for MultipartForm<T>
where
    S: Send + Sync,
    T: From<MultipartFields>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        let mut fields = MultipartFields::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::bad_request(e.body_text()))?;
                    // Browsers send an empty part when no file was picked
                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    fields.insert_file(
                        name,
                        UploadedFile {
                            file_name,
                            content_type,
                            bytes: bytes.to_vec(),
                        },
                    );
                }
                None => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| ApiError::bad_request(e.body_text()))?;
                    fields.insert_text(name, value);
                }
            }
        }

        Ok(MultipartForm(T::from(fields)))
    }
}
