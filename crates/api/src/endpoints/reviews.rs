//! Review endpoints.

use axum::{Json, Router, extract::State, routing::post};
use serde::Serialize;
use wayfare_common::AppResult;
use wayfare_core::{CreateReviewInput, ReviewResponse};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// `{review}` data payload.
#[derive(Debug, Serialize)]
pub struct ReviewData {
    pub review: ReviewResponse,
}

/// Review a completed booking.
async fn create_review(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateReviewInput>,
) -> AppResult<ApiResponse<ReviewData>> {
    let review = state.review_service.create(&claims.sub, input).await?;
    Ok(ApiResponse::created(ReviewData { review }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_review))
}
