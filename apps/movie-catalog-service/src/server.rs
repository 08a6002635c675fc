//! HTTP/JSON API server implementation.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use matinee_resilience::CircuitBreakerMetrics;
use serde::Serialize;
use uuid::Uuid;

use crate::catalog::CatalogService;
use crate::models::CatalogItem;

/// Shared state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// Application version.
    pub version: String,
    /// Catalog assembly service.
    pub catalog: Arc<CatalogService>,
}

/// Create the Axum router with all endpoints.
#[must_use]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/catalog/{user_id}", get(get_catalog))
        .with_state(state)
}

/// Health check response, including downstream breaker states.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: &'static str,
    /// Application version.
    pub version: String,
    /// Circuit breaker snapshots for the downstream services.
    pub downstreams: Vec<CircuitBreakerMetrics>,
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: state.version,
        downstreams: state.catalog.breaker_metrics(),
    })
}

/// Catalog endpoint: a user's ratings enriched with movie metadata.
async fn get_catalog(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<Vec<CatalogItem>> {
    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, user_id = %user_id, "Assembling catalog");

    let items = state.catalog.catalog_for(&user_id).await;

    tracing::info!(%request_id, item_count = items.len(), "Catalog assembled");
    Json(items)
}
