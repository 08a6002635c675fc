//! Movie Catalog Service Binary
//!
//! Aggregates ratings and movie metadata into a per-user catalog.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p movie-catalog-service
//! ```
//!
//! # Environment Variables
//!
//! - `CATALOG_HTTP_PORT`: HTTP server port (default: 8081)
//! - `CATALOG_RATING_SERVICE_URL`: Rating service base URL (default: <http://localhost:8083>)
//! - `CATALOG_MOVIE_INFO_URL`: Movie info service base URL (default: <http://localhost:8082>)
//! - `CATALOG_CALL_TIMEOUT_MS`: Downstream call timeout (default: 2000)
//! - `RUST_LOG`: Log level (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use matinee_connect::{JsonClient, ServiceRegistry, StaticRegistry};
use movie_catalog_service::catalog::CatalogService;
use movie_catalog_service::clients::{
    MOVIE_INFO_SERVICE, MovieInfoClient, RATING_SERVICE, RatingsClient,
};
use movie_catalog_service::config::Settings;
use movie_catalog_service::server::{AppState, create_router};
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing();

    tracing::info!("Starting movie catalog service");

    let settings = Settings::from_env();
    tracing::info!(
        rating_service_url = %settings.rating_service_url,
        movie_info_url = %settings.movie_info_url,
        call_timeout_ms = u64::try_from(settings.call_timeout.as_millis()).unwrap_or(u64::MAX),
        "Configuration loaded"
    );

    let registry: Arc<dyn ServiceRegistry> = Arc::new(
        StaticRegistry::new()
            .with_route(RATING_SERVICE, settings.rating_service_url.clone())
            .with_route(MOVIE_INFO_SERVICE, settings.movie_info_url.clone()),
    );
    let client = JsonClient::new(settings.call_timeout)?;

    let catalog = Arc::new(CatalogService::new(
        Arc::new(RatingsClient::new(Arc::clone(&registry), client.clone())),
        Arc::new(MovieInfoClient::new(registry, client)),
        settings.call_timeout,
    ));

    let state = AppState {
        version: env!("CARGO_PKG_VERSION").to_string(),
        catalog,
    };
    let app = create_router(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", settings.http_port).parse()?;
    tracing::info!(%addr, "HTTP server starting");
    tracing::info!("Endpoints:");
    tracing::info!("  GET /health");
    tracing::info!("  GET /catalog/{{user_id}}");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Movie catalog service stopped");
    Ok(())
}

/// Initialize the tracing subscriber with environment filter.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}
