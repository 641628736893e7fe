//! Media upload service.
//!
//! Thin orchestration over the [`MediaStorage`] backend: pick a storage
//! key inside the requested folder, push the bytes, hand back the
//! `{public_id, url}` pair the tour write path persists.

use std::sync::Arc;

use serde::Serialize;
use wayfare_common::{AppError, AppResult, MediaStorage, generate_media_key};

/// Upload size cap, in bytes.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Folders media can be uploaded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFolder {
    /// Tour cover photos.
    TourCover,
    /// Tour gallery images.
    TourGallery,
    /// User avatars.
    Avatar,
}

impl MediaFolder {
    /// Storage path prefix for this folder.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::TourCover => "tours/cover",
            Self::TourGallery => "tours/gallery",
            Self::Avatar => "avatars",
        }
    }

    /// Parse the folder from its request name.
    pub fn parse(name: &str) -> AppResult<Self> {
        match name {
            "tour_cover" => Ok(Self::TourCover),
            "tour_gallery" => Ok(Self::TourGallery),
            "avatar" => Ok(Self::Avatar),
            other => Err(AppError::Validation(format!("Unknown folder: {other}"))),
        }
    }
}

/// Response for an uploaded media object.
#[derive(Debug, Clone, Serialize)]
pub struct MediaResponse {
    pub public_id: String,
    pub url: String,
    pub size: u64,
    pub content_type: String,
}

/// Media upload service.
#[derive(Clone)]
pub struct MediaService {
    storage: Arc<dyn MediaStorage>,
}

impl MediaService {
    /// Create a new media service.
    #[must_use]
    pub fn new(storage: Arc<dyn MediaStorage>) -> Self {
        Self { storage }
    }

    /// Upload one media object into a folder.
    pub async fn upload(
        &self,
        folder: MediaFolder,
        file_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> AppResult<MediaResponse> {
        if data.is_empty() {
            return Err(AppError::Validation("Empty upload".to_string()));
        }
        if data.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::Validation(format!(
                "Upload exceeds {MAX_UPLOAD_BYTES} bytes"
            )));
        }
        if !content_type.starts_with("image/") {
            return Err(AppError::Validation(format!(
                "Unsupported content type: {content_type}"
            )));
        }

        let key = generate_media_key(folder.prefix(), file_name);
        let stored = self.storage.upload(&key, data, content_type).await?;

        tracing::info!(
            key = %stored.public_id,
            size = stored.size,
            "Media uploaded"
        );

        Ok(MediaResponse {
            public_id: stored.public_id,
            url: stored.url,
            size: stored.size,
            content_type: stored.content_type,
        })
    }

    /// Delete a media object by its identifier.
    pub async fn delete(&self, public_id: &str) -> AppResult<()> {
        self.storage.delete(public_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfare_common::StoredMedia;

    struct RecordingStorage;

    #[async_trait::async_trait]
    impl MediaStorage for RecordingStorage {
        async fn upload(
            &self,
            key: &str,
            data: &[u8],
            content_type: &str,
        ) -> AppResult<StoredMedia> {
            Ok(StoredMedia {
                public_id: key.to_string(),
                url: format!("https://media.example.com/{key}"),
                size: data.len() as u64,
                content_type: content_type.to_string(),
                md5: String::new(),
            })
        }

        async fn delete(&self, _key: &str) -> AppResult<()> {
            Ok(())
        }

        fn public_url(&self, key: &str) -> String {
            format!("https://media.example.com/{key}")
        }

        async fn exists(&self, _key: &str) -> AppResult<bool> {
            Ok(true)
        }
    }

    #[tokio::test]
    async fn test_upload_returns_id_and_url() {
        let service = MediaService::new(Arc::new(RecordingStorage));
        let media = service
            .upload(MediaFolder::TourCover, "beach.jpg", "image/jpeg", b"fake")
            .await
            .unwrap();

        assert!(media.public_id.starts_with("tours/cover/"));
        assert!(media.url.contains(&media.public_id));
        assert_eq!(media.size, 4);
    }

    #[tokio::test]
    async fn test_upload_rejects_non_image() {
        let service = MediaService::new(Arc::new(RecordingStorage));
        let result = service
            .upload(MediaFolder::Avatar, "notes.txt", "text/plain", b"hi")
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_upload_rejects_empty_body() {
        let service = MediaService::new(Arc::new(RecordingStorage));
        let result = service
            .upload(MediaFolder::Avatar, "a.png", "image/png", b"")
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_folder_parsing() {
        assert_eq!(
            MediaFolder::parse("tour_gallery").unwrap(),
            MediaFolder::TourGallery
        );
        assert!(MediaFolder::parse("documents").is_err());
    }
}
