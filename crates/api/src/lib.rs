//! Temperature Log API Server
//!
//! Records location-tagged temperature readings and serves ranked history.

use axum::{
    routing::get,
    Router,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

pub mod config;
pub mod error;
pub mod routes;
pub mod validation;

pub use config::AppConfig;
pub use error::ApiError;

use storage::Repository;

/// Application state shared across handlers
pub struct AppState {
    /// Storage repository
    pub repository: Repository,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: Instant,
}

impl AppState {
    /// Create new application state over an opened repository
    pub fn new(repository: Repository) -> Self {
        Self {
            repository,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: Instant::now(),
        }
    }
}

/// Create the application router
///
/// When `static_dir` is given, unmatched paths are served from it.
pub fn create_router(state: Arc<AppState>, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route(
            "/temperature/:key",
            get(routes::temperature::record_reading).delete(routes::temperature::delete_reading),
        )
        .route("/history", get(routes::history::get_history))
        .route("/health", get(routes::health::health_handler));

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Initialize logging
///
/// Unknown levels fall back to INFO. A second call leaves the first
/// subscriber in place.
pub fn init_logging(level: &str) {
    let max_level = level.parse::<Level>().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(max_level)
        .with_target(true)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        warn!("Tracing subscriber already installed");
    }
}

/// Run the server until interrupted
pub async fn run_server(config: &AppConfig) -> anyhow::Result<()> {
    let repository = Repository::connect(&config.database_path).await?;
    let state = Arc::new(AppState::new(repository));
    let app = create_router(state, config.static_dir.as_deref());

    let addr = config.bind_addr();
    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
