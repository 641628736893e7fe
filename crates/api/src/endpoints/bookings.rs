//! Booking endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch, post},
};
use serde::{Deserialize, Serialize};
use wayfare_common::{AppError, AppResult};
use wayfare_core::{BookingResponse, CreateBookingInput};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// `{booking}` data payload.
#[derive(Debug, Serialize)]
pub struct BookingData {
    pub booking: BookingResponse,
}

/// `{bookings}` data payload.
#[derive(Debug, Serialize)]
pub struct BookingListData {
    pub bookings: Vec<BookingResponse>,
    pub total: usize,
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

/// Request to update a booking's status.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Book a tour.
async fn create_booking(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateBookingInput>,
) -> AppResult<ApiResponse<BookingData>> {
    let booking = state.booking_service.create(&claims.sub, input).await?;
    Ok(ApiResponse::created(BookingData { booking }))
}

/// List all bookings. Admin only.
async fn list_bookings(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> AppResult<ApiResponse<BookingListData>> {
    if !auth.is_admin() {
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }

    let bookings = state
        .booking_service
        .list_all(page.limit, page.offset)
        .await?;
    let total = bookings.len();
    Ok(ApiResponse::ok(BookingListData { bookings, total }))
}

/// List the caller's bookings.
async fn my_bookings(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> AppResult<ApiResponse<BookingListData>> {
    let bookings = state
        .booking_service
        .list_mine(&claims.sub, page.limit, page.offset)
        .await?;
    let total = bookings.len();
    Ok(ApiResponse::ok(BookingListData { bookings, total }))
}

/// Get a booking. Owner or admin.
async fn get_booking(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<BookingData>> {
    let booking = state
        .booking_service
        .get(&auth.0.sub, auth.is_admin(), &id)
        .await?;
    Ok(ApiResponse::ok(BookingData { booking }))
}

/// Update a booking's status. Admin only.
async fn update_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> AppResult<ApiResponse<BookingData>> {
    if !auth.is_admin() {
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }

    let booking = state.booking_service.update_status(&id, &req.status).await?;
    Ok(ApiResponse::ok(BookingData { booking }))
}

/// Cancel a booking. Owner only.
async fn cancel_booking(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<BookingData>> {
    let booking = state.booking_service.cancel(&claims.sub, &id).await?;
    Ok(ApiResponse::ok(BookingData { booking }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_booking).get(list_bookings))
        .route("/me", get(my_bookings))
        .route("/{id}", get(get_booking))
        .route("/{id}/status", patch(update_status))
        .route("/{id}/cancel", post(cancel_booking))
}
