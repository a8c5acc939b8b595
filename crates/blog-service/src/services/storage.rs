//! Uploaded file storage
//!
//! Files land under `<upload_dir>/<kind>/<YYYYMMDD>/<uuid>.<ext>`; the part
//! after `upload_dir` is what gets stored in the database and served under
//! the media URL.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::dto::UploadedFile;

use super::error::{ServiceError, ServiceResult};

/// Image extensions accepted for avatars and article covers
const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// Which upload folder a file belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Avatar,
    Article,
}

impl MediaKind {
    fn dir(self) -> &'static str {
        match self {
            Self::Avatar => "avatar",
            Self::Article => "article",
        }
    }
}

/// Local-disk media store
#[derive(Debug, Clone)]
pub struct MediaStorage {
    root: PathBuf,
    media_url: String,
    max_bytes: usize,
}

impl MediaStorage {
    pub fn new(root: impl Into<PathBuf>, media_url: impl Into<String>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            media_url: media_url.into(),
            max_bytes,
        }
    }

    pub fn from_config(config: &blog_common::StorageConfig) -> Self {
        Self::new(
            &config.upload_dir,
            &config.media_url,
            config.max_file_size_bytes(),
        )
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn media_url(&self) -> &str {
        &self.media_url
    }

    /// Public URL of a stored relative path
    pub fn url_for(&self, relative: &str) -> String {
        format!("{}/{}", self.media_url.trim_end_matches('/'), relative)
    }

    /// Lower-cased extension taken from the client file name, if it is an accepted image type
    fn extension_of(file: &UploadedFile) -> ServiceResult<String> {
        let ext = Path::new(&file.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .or_else(|| {
                file.content_type
                    .as_deref()
                    .and_then(|ct| ct.strip_prefix("image/"))
                    .map(str::to_ascii_lowercase)
            })
            .ok_or_else(|| ServiceError::validation("Unsupported file type"))?;

        if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            Ok(ext)
        } else {
            Err(ServiceError::validation("Unsupported file type"))
        }
    }

    /// Build the relative path a new upload will get
    fn relative_path(kind: MediaKind, ext: &str) -> String {
        format!(
            "{}/{}/{}.{ext}",
            kind.dir(),
            Utc::now().format("%Y%m%d"),
            Uuid::new_v4().simple()
        )
    }

    /// Write an upload to disk and return its relative path
    #[instrument(skip(self, file), fields(file_name = %file.file_name, size = file.bytes.len()))]
    pub async fn save(&self, kind: MediaKind, file: &UploadedFile) -> ServiceResult<String> {
        if file.bytes.is_empty() {
            return Err(ServiceError::validation("Uploaded file is empty"));
        }
        if file.bytes.len() > self.max_bytes {
            return Err(ServiceError::validation("Uploaded file is too large"));
        }

        let ext = Self::extension_of(file)?;
        let relative = Self::relative_path(kind, &ext);
        let target = self.root.join(&relative);

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::internal(format!("create {}: {e}", parent.display())))?;
        }
        tokio::fs::write(&target, &file.bytes)
            .await
            .map_err(|e| ServiceError::internal(format!("write {}: {e}", target.display())))?;

        debug!(path = %relative, "Stored upload");
        Ok(relative)
    }
}
