//! Guide endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch, post},
};
use serde::{Deserialize, Serialize};
use wayfare_common::AppResult;
use wayfare_core::{CreateGuideInput, GuideResponse, SearchGuidesInput};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// `{guide}` data payload.
#[derive(Debug, Serialize)]
pub struct GuideData {
    pub guide: GuideResponse,
}

/// `{guides}` data payload.
#[derive(Debug, Serialize)]
pub struct GuideListData {
    pub guides: Vec<GuideResponse>,
    pub total: usize,
}

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_experience: Option<i32>,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

const fn default_limit() -> u64 {
    20
}

/// Request to update availability.
#[derive(Debug, Deserialize)]
pub struct UpdateAvailabilityRequest {
    pub availability: String,
}

/// Request to update pricing.
#[derive(Debug, Deserialize)]
pub struct UpdatePricingRequest {
    pub price_per_day: f64,
}

/// Register a guide profile for the caller.
async fn create_guide(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateGuideInput>,
) -> AppResult<ApiResponse<GuideData>> {
    let guide = state.guide_service.create(&claims.sub, input).await?;
    Ok(ApiResponse::created(GuideData { guide }))
}

/// Search available guides.
async fn search_guides(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<ApiResponse<GuideListData>> {
    let input = SearchGuidesInput {
        min_price: query.min_price,
        max_price: query.max_price,
        min_experience: query.min_experience,
    };

    let guides = state
        .guide_service
        .search(input, query.limit, query.offset)
        .await?;
    let total = guides.len();
    Ok(ApiResponse::ok(GuideListData { guides, total }))
}

/// Get the caller's guide profile.
async fn my_guide(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<GuideData>> {
    let guide = state.guide_service.get_by_user(&claims.sub).await?;
    Ok(ApiResponse::ok(GuideData { guide }))
}

/// Get a guide by ID.
async fn get_guide(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<GuideData>> {
    let guide = state.guide_service.get(&id).await?;
    Ok(ApiResponse::ok(GuideData { guide }))
}

/// Update the caller's availability.
async fn update_availability(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateAvailabilityRequest>,
) -> AppResult<ApiResponse<GuideData>> {
    let guide = state
        .guide_service
        .update_availability(&claims.sub, &req.availability)
        .await?;
    Ok(ApiResponse::ok(GuideData { guide }))
}

/// Update the caller's daily price.
async fn update_pricing(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdatePricingRequest>,
) -> AppResult<ApiResponse<GuideData>> {
    let guide = state
        .guide_service
        .update_pricing(&claims.sub, req.price_per_day)
        .await?;
    Ok(ApiResponse::ok(GuideData { guide }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_guide))
        .route("/search", get(search_guides))
        .route("/me", get(my_guide))
        .route("/me/availability", patch(update_availability))
        .route("/me/pricing", patch(update_pricing))
        .route("/{id}", get(get_guide))
}
