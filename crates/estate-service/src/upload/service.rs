//! Photo upload service: validation, storage and public URL mapping.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use tracing::{debug, info};

use estate_core::config::StorageConfig;
use estate_core::error::AppError;
use estate_core::traits::storage::StorageProvider;
use estate_storage::stored_file_name;

/// A photo received from a client.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    /// File name as sent by the client.
    pub file_name: Option<String>,
    /// Declared MIME type.
    pub content_type: Option<String>,
    /// File content.
    pub data: Bytes,
}

impl PhotoUpload {
    /// A part without a file name or without content carries no photo.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty() || self.file_name.as_deref().is_none_or(str::is_empty)
    }
}

/// A photo written to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPhoto {
    /// Server-generated file name.
    pub file_name: String,
    /// Publicly reachable URL of the file.
    pub url: String,
}

/// Stores listing photos and maps them to public URLs.
#[derive(Debug, Clone)]
pub struct UploadService {
    /// Storage backend holding the files.
    storage: Arc<dyn StorageProvider>,
    /// Storage configuration.
    config: StorageConfig,
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(storage: Arc<dyn StorageProvider>, config: StorageConfig) -> Self {
        Self { storage, config }
    }

    /// Whether the storage backend is usable.
    pub async fn health_check(&self) -> bool {
        match self.storage.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                debug!(provider = self.storage.provider_type(), error = %e, "Storage health check failed");
                false
            }
        }
    }

    /// Maximum accepted photo size in bytes.
    pub fn max_upload_size(&self) -> u64 {
        self.config.max_upload_size_bytes
    }

    /// Check size and MIME type limits.
    pub fn validate(&self, upload: &PhotoUpload) -> Result<(), AppError> {
        if upload.data.len() as u64 > self.config.max_upload_size_bytes {
            return Err(AppError::validation(format!(
                "Photo exceeds maximum upload size of {} bytes",
                self.config.max_upload_size_bytes
            )));
        }

        if !self.config.allowed_mime_types.is_empty() {
            let mime = upload
                .content_type
                .as_deref()
                .map(|m| m.split(';').next().unwrap_or(m).trim().to_ascii_lowercase())
                .unwrap_or_default();
            if !self.config.allowed_mime_types.iter().any(|a| a.eq_ignore_ascii_case(&mime)) {
                let shown = if mime.is_empty() { "unknown" } else { mime.as_str() };
                return Err(AppError::validation(format!("Unsupported photo type: {shown}")));
            }
        }

        Ok(())
    }

    /// Validate and store a photo under a fresh server-generated name.
    pub async fn store(&self, upload: PhotoUpload) -> Result<StoredPhoto, AppError> {
        self.validate(&upload)?;

        let file_name = stored_file_name(upload.file_name.as_deref(), Utc::now());
        let size = upload.data.len();
        self.storage.write_new(&file_name, upload.data).await?;

        let url = self.public_url(&file_name);
        info!(file_name = %file_name, size, "Stored photo");

        Ok(StoredPhoto { file_name, url })
    }

    /// Public URL for a stored file name.
    pub fn public_url(&self, file_name: &str) -> String {
        format!("{}/{}", self.config.public_url_prefix(), file_name)
    }

    /// Stored file name behind a URL, if the URL points into this server's uploads.
    pub fn file_name_from_url(&self, url: &str) -> Option<String> {
        let prefix = format!("{}/", self.config.public_url_prefix());
        let name = url.strip_prefix(&prefix)?;
        if name.is_empty() || name.contains('/') || name.contains('\\') || name == ".." {
            return None;
        }
        Some(name.to_string())
    }

    /// Delete the file behind a URL. Returns `false` for URLs this server does not own.
    pub async fn remove(&self, url: &str) -> Result<bool, AppError> {
        let Some(file_name) = self.file_name_from_url(url) else {
            debug!(url, "Photo URL is not served from local uploads, skipping removal");
            return Ok(false);
        };
        self.storage.delete(&file_name).await?;
        info!(file_name = %file_name, "Removed photo");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use estate_core::error::ErrorKind;
    use estate_storage::LocalStorageProvider;

    use super::*;

    async fn service(dir: &tempfile::TempDir) -> UploadService {
        let provider = LocalStorageProvider::new(dir.path().to_str().unwrap())
            .await
            .unwrap();
        let config = StorageConfig {
            upload_dir: dir.path().display().to_string(),
            public_base_url: "https://api.example.com/".to_string(),
            max_upload_size_bytes: 16,
            ..StorageConfig::default()
        };
        UploadService::new(Arc::new(provider), config)
    }

    fn upload(name: &str, mime: &str, data: &'static [u8]) -> PhotoUpload {
        PhotoUpload {
            file_name: Some(name.to_string()),
            content_type: Some(mime.to_string()),
            data: Bytes::from_static(data),
        }
    }

    #[test]
    fn test_empty_parts() {
        assert!(upload("a.png", "image/png", b"").is_empty());
        assert!(upload("", "image/png", b"x").is_empty());
        assert!(!upload("a.png", "image/png", b"x").is_empty());
    }

    #[tokio::test]
    async fn test_store_builds_public_url() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(&dir).await;

        let stored = svc.store(upload("House.JPG", "image/jpeg", b"jpeg")).await.unwrap();

        assert!(stored.file_name.ends_with(".jpg"));
        assert_eq!(
            stored.url,
            format!("https://api.example.com/uploads/{}", stored.file_name)
        );
        assert!(dir.path().join(&stored.file_name).is_file());
    }

    #[tokio::test]
    async fn test_rejects_oversized_and_wrong_type() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(&dir).await;

        let err = svc
            .store(upload("big.png", "image/png", b"0123456789abcdefXYZ"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = svc
            .store(upload("notes.txt", "text/plain", b"hi"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "Unsupported photo type: text/plain");
    }

    #[tokio::test]
    async fn test_mime_parameters_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(&dir).await;
        assert!(svc.validate(&upload("a.png", "Image/PNG; charset=binary", b"x")).is_ok());
    }

    #[tokio::test]
    async fn test_file_name_from_url() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(&dir).await;

        assert_eq!(
            svc.file_name_from_url("https://api.example.com/uploads/1-abc.png"),
            Some("1-abc.png".to_string())
        );
        assert_eq!(svc.file_name_from_url("https://cdn.example.com/uploads/1-abc.png"), None);
        assert_eq!(svc.file_name_from_url("https://api.example.com/uploads/a/b.png"), None);
        assert_eq!(svc.file_name_from_url("https://api.example.com/uploads/"), None);
    }

    #[tokio::test]
    async fn test_remove_only_owned_urls() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(&dir).await;

        let stored = svc.store(upload("a.gif", "image/gif", b"gif")).await.unwrap();
        assert!(svc.remove(&stored.url).await.unwrap());
        assert!(!dir.path().join(&stored.file_name).exists());

        assert!(!svc.remove("https://elsewhere.example.com/x.gif").await.unwrap());
    }
}
