//! Movie Info Service Binary
//!
//! Serves movie metadata fetched from an external TMDB-style provider.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p movie-info-service
//! ```
//!
//! # Environment Variables
//!
//! ## Required
//! - `TMDB_API_KEY`: Authorization header value for the provider
//!
//! ## Optional
//! - `TMDB_URL`: Provider base URL (default: <https://api.themoviedb.org/3/movie/>)
//! - `TMDB_LANG`: Language hint passed to the provider
//! - `MOVIE_INFO_HTTP_PORT`: HTTP server port (default: 8082)
//! - `MOVIE_INFO_CALL_TIMEOUT_MS`: Provider call timeout (default: 2000)
//! - `RUST_LOG`: Log level (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use movie_info_service::config::Settings;
use movie_info_service::movies::MovieService;
use movie_info_service::server::{AppState, create_router};
use movie_info_service::tmdb::TmdbClient;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing();

    tracing::info!("Starting movie info service");

    let settings = Settings::from_env()?;
    tracing::info!(
        provider_url = %settings.tmdb.base_url,
        call_timeout_ms = u64::try_from(settings.call_timeout.as_millis()).unwrap_or(u64::MAX),
        "Configuration loaded"
    );

    let provider = TmdbClient::new(&settings.tmdb, settings.call_timeout)?;
    let movies = Arc::new(MovieService::new(Arc::new(provider), settings.call_timeout));

    let state = AppState {
        version: env!("CARGO_PKG_VERSION").to_string(),
        movies,
    };
    let app = create_router(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", settings.http_port).parse()?;
    tracing::info!(%addr, "HTTP server starting");
    tracing::info!("Endpoints:");
    tracing::info!("  GET /health");
    tracing::info!("  GET /movies/{{movie_id}}");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Movie info service stopped");
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
