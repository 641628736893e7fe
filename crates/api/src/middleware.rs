//! API middleware.

#![allow(missing_docs)]

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use wayfare_core::{
    AgencyService, AuthService, BookingService, GuideService, MediaService, ReviewService,
    TourService, UserService,
};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub agency_service: AgencyService,
    pub guide_service: GuideService,
    pub tour_service: TourService,
    pub booking_service: BookingService,
    pub review_service: ReviewService,
    pub media_service: MediaService,
}

/// Authentication middleware.
///
/// Verifies a `Bearer` access token when present and stores the claims
/// in request extensions; endpoints opt into requiring them via the
/// `AuthUser` extractor.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
        && let Ok(claims) = state.auth_service.verify_token(token)
    {
        req.extensions_mut().insert(claims);
    }

    next.run(req).await
}
