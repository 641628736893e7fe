//! HTTP API layer for wayfare.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: resource routers under `/api`
//! - **Extractors**: authentication claims
//! - **Middleware**: Bearer-JWT authentication, rate limiting
//! - **Response**: the `{status, data}` success envelope
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod rate_limit;
pub mod response;

pub use endpoints::router;
pub use middleware::AppState;
pub use rate_limit::{ApiRateLimiter, RateLimitConfig, RateLimiterState};
pub use response::ApiResponse;
