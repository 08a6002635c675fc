//! Movie Rating Service Binary
//!
//! Serves hardcoded movie ratings for the Matinee demo.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p movie-rating-service
//! ```
//!
//! # Environment Variables
//!
//! - `RATING_HTTP_PORT`: HTTP server port (default: 8083)
//! - `RUST_LOG`: Log level (default: info)

use std::net::SocketAddr;

use movie_rating_service::config::Settings;
use movie_rating_service::server::{AppState, create_router};
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing();

    tracing::info!("Starting movie rating service");

    let settings = Settings::from_env();
    let state = AppState {
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    let app = create_router(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", settings.http_port).parse()?;
    tracing::info!(%addr, "HTTP server starting");
    tracing::info!("Endpoints:");
    tracing::info!("  GET /health");
    tracing::info!("  GET /ratings-data/{{movie_id}}");
    tracing::info!("  GET /ratings-data/users/{{user_id}}");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Movie rating service stopped");
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
