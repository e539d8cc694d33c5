//! Fundacja portal server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use fundacja_api::{router as api_router, AppState};
use fundacja_common::Config;
use fundacja_core::{
    BannerService, CategoryService, ContactService, GalleryService, ListingService,
    MedicalCenterService, PostService, SearchService, TagService,
};
use fundacja_db::repositories::{
    AuthorRepository, BannerRepository, CategoryRepository, GalleryImageRepository,
    MedicalCenterRepository, PostRepository, TagRepository,
};
use axum::Router;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

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

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fundacja=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting fundacja portal server...");

    // Load configuration
    let config = Arc::new(Config::load()?);

    // Connect to database
    let db = fundacja_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    fundacja_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let post_repo = PostRepository::new(Arc::clone(&db));
    let category_repo = CategoryRepository::new(Arc::clone(&db));
    let author_repo = AuthorRepository::new(Arc::clone(&db));
    let tag_repo = TagRepository::new(Arc::clone(&db));
    let gallery_repo = GalleryImageRepository::new(Arc::clone(&db));
    let banner_repo = BannerRepository::new(Arc::clone(&db));
    let center_repo = MedicalCenterRepository::new(Arc::clone(&db));

    // Initialize services
    let post_service = PostService::new(
        post_repo.clone(),
        category_repo.clone(),
        author_repo.clone(),
        gallery_repo.clone(),
    );
    let category_service = CategoryService::new(
        category_repo.clone(),
        post_repo.clone(),
        author_repo.clone(),
    );
    let tag_service = TagService::new(
        tag_repo,
        post_repo.clone(),
        category_repo.clone(),
        author_repo.clone(),
    );
    let gallery_service = GalleryService::new(gallery_repo, post_repo.clone());
    let listing_service = ListingService::new(
        post_repo.clone(),
        category_repo.clone(),
        author_repo.clone(),
        banner_repo.clone(),
    );
    let search_service = SearchService::new(post_repo, category_repo, author_repo);
    let medical_center_service = MedicalCenterService::new(center_repo, config.import.clone());
    let banner_service = BannerService::new(banner_repo);
    let contact_service = ContactService::new(config.mail.clone());

    // Create app state
    let state = AppState {
        config: Arc::clone(&config),
        post_service,
        category_service,
        tag_service,
        gallery_service,
        listing_service,
        search_service,
        medical_center_service,
        banner_service,
        contact_service,
    };

    // Build router
    let app = Router::new()
        .nest("/api", api_router())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
