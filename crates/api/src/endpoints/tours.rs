//! Tour endpoints.
//!
//! The read side (`GET /tours`, `GET /tours/{id}`) serves the fully
//! aggregated tour -> schedules -> activities views.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use wayfare_common::{AppError, AppResult};
use wayfare_core::{
    CreateTourInput, ReviewResponse, SearchToursInput, TourSummary, TourView, UpdateTourInput,
};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// `{tour}` data payload.
#[derive(Debug, Serialize)]
pub struct TourData {
    pub tour: TourView,
}

/// `{tours}` data payload.
#[derive(Debug, Serialize)]
pub struct TourListData {
    pub tours: Vec<TourView>,
    pub total: usize,
}

/// `{tours}` data payload for flat listings.
#[derive(Debug, Serialize)]
pub struct TourSummaryListData {
    pub tours: Vec<TourSummary>,
    pub total: usize,
}

/// `{reviews}` data payload.
#[derive(Debug, Serialize)]
pub struct TourReviewsData {
    pub reviews: Vec<ReviewResponse>,
    pub total: usize,
}

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub country_id: Option<String>,
    pub city_id: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub duration: Option<String>,
    pub departs_after: Option<chrono::NaiveDate>,
}

/// Featured query parameters.
#[derive(Debug, Deserialize)]
pub struct FeaturedQuery {
    pub limit: Option<u64>,
}

/// Pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

const fn default_limit() -> u64 {
    20
}

/// Resolve the caller's agency id, or fail for non-admins.
async fn caller_agency_id(state: &AppState, auth: &AuthUser) -> AppResult<String> {
    match state.agency_service.find_model_by_user(&auth.0.sub).await? {
        Some(agency) => Ok(agency.id),
        None if auth.is_admin() => Ok(String::new()),
        None => Err(AppError::Forbidden(
            "An agency profile is required to manage tours".to_string(),
        )),
    }
}

/// List all tours with full itineraries.
async fn list_tours(State(state): State<AppState>) -> AppResult<ApiResponse<TourListData>> {
    let tours = state.tour_service.list().await?;
    let total = tours.len();
    Ok(ApiResponse::ok(TourListData { tours, total }))
}

/// Get one tour with its full itinerary.
async fn get_tour(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<TourData>> {
    let tour = state.tour_service.get(&id).await?;
    Ok(ApiResponse::ok(TourData { tour }))
}

/// Create a tour. Caller must own an agency profile.
async fn create_tour(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTourInput>,
) -> AppResult<ApiResponse<TourData>> {
    let agency_id = caller_agency_id(&state, &auth).await?;
    if agency_id.is_empty() {
        return Err(AppError::Forbidden(
            "An agency profile is required to create tours".to_string(),
        ));
    }

    let tour = state.tour_service.create(&agency_id, input).await?;
    Ok(ApiResponse::created(TourData { tour }))
}

/// Update a tour. Owner or admin.
async fn update_tour(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateTourInput>,
) -> AppResult<ApiResponse<TourData>> {
    let agency_id = caller_agency_id(&state, &auth).await?;
    let tour = state
        .tour_service
        .update(&agency_id, auth.is_admin(), &id, input)
        .await?;
    Ok(ApiResponse::ok(TourData { tour }))
}

/// Delete a tour. Owner or admin.
async fn delete_tour(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let agency_id = caller_agency_id(&state, &auth).await?;
    state
        .tour_service
        .delete(&agency_id, auth.is_admin(), &id)
        .await?;
    Ok(ApiResponse::ok(serde_json::json!({})))
}

/// Search active tours.
async fn search_tours(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<ApiResponse<TourSummaryListData>> {
    let input = SearchToursInput {
        country_id: query.country_id,
        city_id: query.city_id,
        min_price: query.min_price,
        max_price: query.max_price,
        duration: query.duration,
        departs_after: query.departs_after,
    };

    let tours = state.tour_service.search(input).await?;
    let total = tours.len();
    Ok(ApiResponse::ok(TourSummaryListData { tours, total }))
}

/// Featured tours.
async fn featured_tours(
    State(state): State<AppState>,
    Query(query): Query<FeaturedQuery>,
) -> AppResult<ApiResponse<TourSummaryListData>> {
    let tours = state.tour_service.featured(query.limit).await?;
    let total = tours.len();
    Ok(ApiResponse::ok(TourSummaryListData { tours, total }))
}

/// List reviews of a tour.
async fn tour_reviews(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(page): Query<Pagination>,
) -> AppResult<ApiResponse<TourReviewsData>> {
    // 404 for a missing tour rather than an empty list.
    state.tour_service.get(&id).await?;

    let reviews = state
        .review_service
        .list_by_tour(&id, page.limit, page.offset)
        .await?;
    let total = reviews.len();
    Ok(ApiResponse::ok(TourReviewsData { reviews, total }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tours).post(create_tour))
        .route("/search", get(search_tours))
        .route("/featured", get(featured_tours))
        .route("/{id}", get(get_tour).patch(update_tour).delete(delete_tour))
        .route("/{id}/reviews", get(tour_reviews))
}
