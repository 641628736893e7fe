//! Agency endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use wayfare_common::AppResult;
use wayfare_core::{AgencyResponse, CreateAgencyInput, UpdateAgencyInput};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// `{agency}` data payload.
#[derive(Debug, Serialize)]
pub struct AgencyData {
    pub agency: AgencyResponse,
}

/// `{agencies}` data payload.
#[derive(Debug, Serialize)]
pub struct AgencyListData {
    pub agencies: Vec<AgencyResponse>,
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

/// Register an agency profile for the caller.
async fn create_agency(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateAgencyInput>,
) -> AppResult<ApiResponse<AgencyData>> {
    let agency = state.agency_service.create(&claims.sub, input).await?;
    Ok(ApiResponse::created(AgencyData { agency }))
}

/// List agencies.
async fn list_agencies(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> AppResult<ApiResponse<AgencyListData>> {
    let agencies = state.agency_service.list(page.limit, page.offset).await?;
    let total = agencies.len();
    Ok(ApiResponse::ok(AgencyListData { agencies, total }))
}

/// Get the caller's agency profile.
async fn my_agency(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<AgencyData>> {
    let agency = state.agency_service.get_by_user(&claims.sub).await?;
    Ok(ApiResponse::ok(AgencyData { agency }))
}

/// Get an agency by ID.
async fn get_agency(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<AgencyData>> {
    let agency = state.agency_service.get(&id).await?;
    Ok(ApiResponse::ok(AgencyData { agency }))
}

/// Update an agency. Owner or admin.
async fn update_agency(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateAgencyInput>,
) -> AppResult<ApiResponse<AgencyData>> {
    let is_admin = auth.is_admin();
    let agency = state
        .agency_service
        .update(&auth.0.sub, is_admin, &id, input)
        .await?;
    Ok(ApiResponse::ok(AgencyData { agency }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_agency).get(list_agencies))
        .route("/me", get(my_agency))
        .route("/{id}", get(get_agency).patch(update_agency))
}
