//! Photo upload storage configuration.

use serde::{Deserialize, Serialize};

/// Where uploaded photos live and how they are exposed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory that receives uploaded photos.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    /// Externally reachable base URL of this server, used to build photo URLs.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// URL path prefix under which uploads are served.
    #[serde(default = "default_public_path")]
    pub public_path: String,
    /// Maximum photo size in bytes (default 10 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Accepted photo MIME types; an empty list accepts anything.
    #[serde(default = "default_allowed_mime_types")]
    pub allowed_mime_types: Vec<String>,
    /// Delete a photo file once no property references it any more.
    #[serde(default)]
    pub remove_orphaned_photos: bool,
    /// `max-age` sent with served uploads.
    #[serde(default = "default_cache_max_age")]
    pub cache_max_age_seconds: u64,
}

impl StorageConfig {
    /// The public URL prefix for stored photos, without a trailing slash.
    pub fn public_url_prefix(&self) -> String {
        format!(
            "{}{}",
            self.public_base_url.trim_end_matches('/'),
            self.public_path.trim_end_matches('/')
        )
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            public_base_url: default_public_base_url(),
            public_path: default_public_path(),
            max_upload_size_bytes: default_max_upload(),
            allowed_mime_types: default_allowed_mime_types(),
            remove_orphaned_photos: false,
            cache_max_age_seconds: default_cache_max_age(),
        }
    }
}

fn default_upload_dir() -> String {
    "./uploads".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_public_path() -> String {
    "/uploads".to_string()
}

fn default_max_upload() -> u64 {
    10_485_760 // 10 MB
}

fn default_allowed_mime_types() -> Vec<String> {
    vec![
        "image/jpeg".to_string(),
        "image/png".to_string(),
        "image/gif".to_string(),
        "image/webp".to_string(),
    ]
}

fn default_cache_max_age() -> u64 {
    31_536_000 // one year
}
