//! API endpoints.

mod agencies;
mod auth;
mod bookings;
mod guides;
mod media;
mod reviews;
mod tours;
mod users;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/agencies", agencies::router())
        .nest("/guides", guides::router())
        .nest("/tours", tours::router())
        .nest("/bookings", bookings::router())
        .nest("/reviews", reviews::router())
        .nest("/media", media::router())
}
