//! User endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch},
};
use serde::{Deserialize, Serialize};
use wayfare_common::{AppError, AppResult};
use wayfare_core::{UpdateProfileInput, UserResponse};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// `{user}` data payload.
#[derive(Debug, Serialize)]
pub struct UserData {
    pub user: UserResponse,
}

/// `{users}` data payload.
#[derive(Debug, Serialize)]
pub struct UserListData {
    pub users: Vec<UserResponse>,
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

/// List users. Admin only.
async fn list_users(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> AppResult<ApiResponse<UserListData>> {
    if claims.role != "admin" {
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }

    let users = state.user_service.list(page.limit, page.offset).await?;
    let total = users.len();
    Ok(ApiResponse::ok(UserListData { users, total }))
}

/// Get a user profile by ID.
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<UserData>> {
    let user = state.user_service.get(&id).await?;
    Ok(ApiResponse::ok(UserData { user }))
}

/// Update the caller's profile.
async fn update_me(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfileInput>,
) -> AppResult<ApiResponse<UserData>> {
    let user = state
        .user_service
        .update_profile(&claims.sub, input)
        .await?;
    Ok(ApiResponse::ok(UserData { user }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/me", patch(update_me))
        .route("/{id}", get(get_user))
}
