//! HTTP/JSON API server implementation.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Serialize;

use crate::models::Movie;
use crate::movies::MovieService;

/// Shared state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// Application version.
    pub version: String,
    /// Movie lookup service.
    pub movies: Arc<MovieService>,
}

/// Create the Axum router with all endpoints.
#[must_use]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/movies/{movie_id}", get(get_movie))
        .with_state(state)
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: &'static str,
    /// Application version.
    pub version: String,
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: state.version,
    })
}

/// Movie lookup endpoint.
async fn get_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Json<Movie> {
    tracing::info!(movie_id = %movie_id, "Serving movie info");
    Json(state.movies.movie(&movie_id).await)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use matinee_connect::RemoteCallError;
    use tower::ServiceExt;

    use super::*;
    use crate::models::MovieSummary;
    use crate::tmdb::MovieSummaryPort;

    struct StubProvider;

    #[async_trait]
    impl MovieSummaryPort for StubProvider {
        async fn summary(&self, movie_id: &str) -> Result<MovieSummary, RemoteCallError> {
            Ok(MovieSummary {
                id: movie_id.to_string(),
                title: "Stub Movie".to_string(),
                overview: "A stubbed synopsis".to_string(),
            })
        }
    }

    fn make_router() -> Router {
        create_router(AppState {
            version: "test".to_string(),
            movies: Arc::new(MovieService::new(
                Arc::new(StubProvider),
                Duration::from_secs(1),
            )),
        })
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_check_reports_healthy() {
        let response = make_router()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn movie_endpoint_maps_provider_fields() {
        let response = make_router()
            .oneshot(
                Request::builder()
                    .uri("/movies/550")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["id"], "550");
        assert_eq!(json["name"], "Stub Movie");
        assert_eq!(json["description"], "A stubbed synopsis");
    }
}
