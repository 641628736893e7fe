//! Authentication endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use serde::Serialize;
use wayfare_common::AppResult;
use wayfare_core::{
    AuthResponse, ForgotPasswordInput, LoginInput, RegisterInput, ResetPasswordInput, UserResponse,
};

use crate::{
    extractors::AuthUser,
    middleware::AppState,
    response::{ApiResponse, MessageResponse},
};

/// `{user}` data payload.
#[derive(Debug, Serialize)]
pub struct UserData {
    pub user: UserResponse,
}

/// `{token}` data payload.
#[derive(Debug, Serialize)]
pub struct TokenData {
    pub token: String,
}

/// Register a new account.
async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> AppResult<ApiResponse<AuthResponse>> {
    let auth = state.auth_service.register(input).await?;
    Ok(ApiResponse::created(auth))
}

/// Log in with email and password.
async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> AppResult<ApiResponse<AuthResponse>> {
    let auth = state.auth_service.login(input).await?;
    Ok(ApiResponse::ok(auth))
}

/// Issue a fresh token for the authenticated caller.
async fn refresh(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<TokenData>> {
    let token = state.auth_service.refresh(&claims.sub).await?;
    Ok(ApiResponse::ok(TokenData { token }))
}

/// Get the authenticated caller's profile.
async fn me(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<UserData>> {
    let user = state.auth_service.me(&claims.sub).await?;
    Ok(ApiResponse::ok(UserData { user }))
}

/// Log out. Tokens are stateless; the client drops its copy.
async fn logout() -> MessageResponse {
    MessageResponse::new("Successfully logged out")
}

/// Start the password-reset flow.
async fn forgot_password(
    State(state): State<AppState>,
    Json(input): Json<ForgotPasswordInput>,
) -> AppResult<MessageResponse> {
    state.auth_service.forgot_password(input).await?;
    Ok(MessageResponse::new(
        "Password reset instructions sent to email",
    ))
}

/// Redeem a reset token.
async fn reset_password(
    State(state): State<AppState>,
    Json(input): Json<ResetPasswordInput>,
) -> AppResult<MessageResponse> {
    state.auth_service.reset_password(input).await?;
    Ok(MessageResponse::new("Password successfully reset"))
}

/// Redeem an email-verification token.
async fn verify_email(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<MessageResponse> {
    state.auth_service.verify_email(&token).await?;
    Ok(MessageResponse::new("Email successfully verified"))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password", post(reset_password))
        .route("/verify-email/{token}", get(verify_email))
}
