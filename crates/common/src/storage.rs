//! Media storage abstraction for cover photo and gallery uploads.
//!
//! The write path hands image bytes to a [`MediaStorage`] backend and gets
//! back a `{public_id, url}` pair, which is what the tour tables persist.
//! Supports the local filesystem and S3-compatible object storage.

use std::path::PathBuf;

use crate::{AppError, AppResult};

/// Stored media metadata returned by an upload.
#[derive(Debug, Clone)]
pub struct StoredMedia {
    /// Media identifier (storage key). Persisted alongside the URL so the
    /// backing object can be deleted when its row goes away.
    pub public_id: String,
    /// Public URL to access the media.
    pub url: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME content type.
    pub content_type: String,
    /// MD5 hash of the content.
    pub md5: String,
}

/// Media storage backend trait.
#[async_trait::async_trait]
pub trait MediaStorage: Send + Sync {
    /// Upload media bytes under the given key.
    async fn upload(&self, key: &str, data: &[u8], content_type: &str) -> AppResult<StoredMedia>;

    /// Delete media by key.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Get the public URL for a key.
    fn public_url(&self, key: &str) -> String;

    /// Check if media exists for a key.
    async fn exists(&self, key: &str) -> AppResult<bool>;
}

/// Local filesystem media storage.
pub struct LocalMediaStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalMediaStorage {
    /// Create a new local storage backend.
    #[must_use]
    pub const fn new(base_path: PathBuf, base_url: String) -> Self {
        Self {
            base_path,
            base_url,
        }
    }
}

#[async_trait::async_trait]
impl MediaStorage for LocalMediaStorage {
    async fn upload(&self, key: &str, data: &[u8], content_type: &str) -> AppResult<StoredMedia> {
        let path = self.base_path.join(key);

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Internal(format!("Failed to create directory: {e}")))?;
        }

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write file: {e}")))?;

        let md5 = format!("{:x}", md5::compute(data));

        Ok(StoredMedia {
            public_id: key.to_string(),
            url: self.public_url(key),
            size: data.len() as u64,
            content_type: content_type.to_string(),
            md5,
        })
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let path = self.base_path.join(key);
        if path.exists() {
            tokio::fs::remove_file(&path)
                .await
                .map_err(|e| AppError::Internal(format!("Failed to delete file: {e}")))?;
        }
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let path = self.base_path.join(key);
        Ok(path.exists())
    }
}

/// S3-compatible media storage.
#[cfg(feature = "s3")]
pub struct S3MediaStorage {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_url: Option<String>,
    prefix: Option<String>,
}

#[cfg(feature = "s3")]
impl S3MediaStorage {
    /// Create a new S3 storage backend.
    pub fn new(
        endpoint: &str,
        bucket: String,
        region: &str,
        access_key_id: &str,
        secret_access_key: &str,
        public_url: Option<String>,
        prefix: Option<String>,
    ) -> Self {
        use aws_config::Region;
        use aws_sdk_s3::config::Credentials;

        let credentials = Credentials::new(access_key_id, secret_access_key, None, None, "wayfare");

        let config = aws_sdk_s3::Config::builder()
            .endpoint_url(endpoint)
            .region(Region::new(region.to_string()))
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        let client = aws_sdk_s3::Client::from_conf(config);

        Self {
            client,
            bucket,
            public_url,
            prefix,
        }
    }

    fn full_key(&self, key: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}/{}", prefix.trim_end_matches('/'), key),
            None => key.to_string(),
        }
    }
}

#[cfg(feature = "s3")]
#[async_trait::async_trait]
impl MediaStorage for S3MediaStorage {
    async fn upload(&self, key: &str, data: &[u8], content_type: &str) -> AppResult<StoredMedia> {
        use aws_sdk_s3::primitives::ByteStream;

        let full_key = self.full_key(key);
        let md5 = format!("{:x}", md5::compute(data));

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&full_key)
            .body(ByteStream::from(data.to_vec()))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("S3 upload failed: {e}")))?;

        Ok(StoredMedia {
            public_id: key.to_string(),
            url: self.public_url(key),
            size: data.len() as u64,
            content_type: content_type.to_string(),
            md5,
        })
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let full_key = self.full_key(key);

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(&full_key)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("S3 delete failed: {e}")))?;

        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        let full_key = self.full_key(key);
        match &self.public_url {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), full_key),
            None => format!("https://{}.s3.amazonaws.com/{}", self.bucket, full_key),
        }
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let full_key = self.full_key(key);

        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(&full_key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => {
                if e.to_string().contains("NotFound") || e.to_string().contains("404") {
                    Ok(false)
                } else {
                    Err(AppError::ExternalService(format!(
                        "S3 head_object failed: {e}"
                    )))
                }
            }
        }
    }
}

/// Generate a storage key for an upload within a folder
/// (e.g. `tours/cover`, `tours/gallery`, `avatars`).
#[must_use]
pub fn generate_media_key(folder: &str, original_name: &str) -> String {
    use chrono::Utc;

    let now = Utc::now();
    let date_path = now.format("%Y/%m").to_string();
    let timestamp = now.timestamp_millis();

    // Extract extension from original name
    let extension = original_name
        .rfind('.')
        .filter(|&pos| pos > 0 && pos < original_name.len() - 1)
        .map(|pos| &original_name[pos + 1..])
        .filter(|ext| ext.len() <= 10 && !ext.is_empty())
        .unwrap_or("bin");

    format!(
        "{}/{}/{}_{}.{}",
        folder.trim_matches('/'),
        date_path,
        timestamp,
        uuid::Uuid::new_v4(),
        extension
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_media_key() {
        let key = generate_media_key("tours/cover", "beach.jpg");
        assert!(key.starts_with("tours/cover/"));
        assert!(key.ends_with(".jpg"));
    }

    #[test]
    fn test_generate_media_key_no_extension() {
        let key = generate_media_key("tours/gallery", "photo");
        assert!(key.ends_with(".bin"));
    }

    #[test]
    fn test_local_public_url_trims_slash() {
        let storage =
            LocalMediaStorage::new(PathBuf::from("/tmp/media"), "/media/".to_string());
        assert_eq!(storage.public_url("a/b.jpg"), "/media/a/b.jpg");
    }
}
