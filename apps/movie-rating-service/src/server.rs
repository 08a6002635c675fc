//! HTTP/JSON API server implementation.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Serialize;

use crate::models::{Rating, UserRating};
use crate::ratings;

/// Shared state for the HTTP server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application version.
    pub version: String,
}

/// Create the Axum router with all endpoints.
#[must_use]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ratings-data/{movie_id}", get(get_movie_rating))
        .route("/ratings-data/users/{user_id}", get(get_user_ratings))
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

/// Rating for a single movie.
async fn get_movie_rating(Path(movie_id): Path<String>) -> Json<Rating> {
    tracing::info!(movie_id = %movie_id, "Serving movie rating");
    Json(ratings::movie_rating(&movie_id))
}

/// All ratings for a user.
async fn get_user_ratings(Path(user_id): Path<String>) -> Json<UserRating> {
    tracing::info!(user_id = %user_id, "Serving user ratings");
    Json(ratings::user_ratings(&user_id))
}
