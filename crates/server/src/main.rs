//! Wayfare server entry point.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{Router, middleware};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wayfare_api::{RateLimiterState, middleware::AppState, router as api_router};
use wayfare_common::{Config, LocalMediaStorage, MediaStorage, config::StorageSettings};
use wayfare_core::{
    AgencyService, AuthService, BookingService, GuideService, Mailer, MediaService, ReviewService,
    TourService, UserService,
};
use wayfare_db::repositories::{
    AgencyRepository, BookingRepository, CatalogRepository, GuideRepository, ReviewRepository,
    TourRepository, UserRepository,
};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

/// Build the media storage backend from configuration.
fn build_storage(config: &Config) -> Arc<dyn MediaStorage> {
    match &config.storage {
        StorageSettings::Local {
            base_path,
            base_url,
        } => Arc::new(LocalMediaStorage::new(
            PathBuf::from(base_path),
            base_url.clone(),
        )),
        #[cfg(feature = "s3")]
        StorageSettings::S3 {
            endpoint,
            bucket,
            region,
            access_key_id,
            secret_access_key,
            public_url,
            prefix,
        } => Arc::new(wayfare_common::storage::S3MediaStorage::new(
            endpoint,
            bucket.clone(),
            region,
            access_key_id,
            secret_access_key,
            public_url.clone(),
            prefix.clone(),
        )),
        #[cfg(not(feature = "s3"))]
        StorageSettings::S3 { .. } => {
            tracing::warn!("S3 storage configured but the s3 feature is disabled; using ./media");
            Arc::new(LocalMediaStorage::new(
                PathBuf::from("./media"),
                "/media".to_string(),
            ))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wayfare=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting wayfare server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = wayfare_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    wayfare_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let agency_repo = AgencyRepository::new(Arc::clone(&db));
    let guide_repo = GuideRepository::new(Arc::clone(&db));
    let catalog_repo = CatalogRepository::new(Arc::clone(&db));
    let tour_repo = TourRepository::new(Arc::clone(&db));
    let booking_repo = BookingRepository::new(Arc::clone(&db));
    let review_repo = ReviewRepository::new(Arc::clone(&db));

    // Initialize mailer (optional, based on config)
    let mailer = match &config.email {
        Some(email_config) => match Mailer::new(email_config, config.server.url.clone()) {
            Ok(mailer) => Some(mailer),
            Err(e) => {
                tracing::warn!(error = %e, "Mailer disabled: invalid email configuration");
                None
            }
        },
        None => None,
    };

    // Initialize media storage
    let storage = build_storage(&config);

    // Initialize services
    let auth_service = AuthService::new(user_repo.clone(), mailer, config.auth.clone());
    let user_service = UserService::new(user_repo.clone());
    let agency_service = AgencyService::new(agency_repo);
    let guide_service = GuideService::new(guide_repo);
    let tour_service = TourService::new(tour_repo.clone(), catalog_repo);
    let booking_service = BookingService::new(booking_repo.clone(), tour_repo);
    let review_service = ReviewService::new(review_repo, booking_repo);
    let media_service = MediaService::new(storage);

    // Create app state
    let state = AppState {
        auth_service,
        user_service,
        agency_service,
        guide_service,
        tour_service,
        booking_service,
        review_service,
        media_service,
    };

    // Initialize API rate limiter
    let rate_limiter = RateLimiterState::new();
    info!("Initialized API rate limiter");

    // Build router
    let app = Router::new()
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(
            rate_limiter,
            wayfare_api::rate_limit::rate_limit_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            wayfare_api::middleware::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
