//! Media upload endpoints.

use axum::{
    Router,
    extract::{Multipart, State},
    routing::post,
};
use serde::Serialize;
use wayfare_common::{AppError, AppResult};
use wayfare_core::{MediaFolder, MediaResponse};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// `{media}` data payload.
#[derive(Debug, Serialize)]
pub struct MediaData {
    pub media: MediaResponse,
}

/// Upload one media file.
///
/// Multipart form with a `file` part and an optional `folder` part
/// (`tour_cover`, `tour_gallery` or `avatar`; defaults to
/// `tour_gallery`).
async fn upload(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<ApiResponse<MediaData>> {
    let mut folder = MediaFolder::TourGallery;
    let mut file: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(ToString::to_string);
        match name.as_deref() {
            Some("folder") => {
                let name = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid folder field: {e}")))?;
                folder = MediaFolder::parse(&name)?;
            }
            Some("file") => {
                let file_name = field.file_name().unwrap_or("upload.bin").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid file field: {e}")))?;
                file = Some((file_name, content_type, data.to_vec()));
            }
            _ => {}
        }
    }

    let (file_name, content_type, data) =
        file.ok_or_else(|| AppError::Validation("Missing file field".to_string()))?;

    let media = state
        .media_service
        .upload(folder, &file_name, &content_type, &data)
        .await?;

    Ok(ApiResponse::created(MediaData { media }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/upload", post(upload))
}
