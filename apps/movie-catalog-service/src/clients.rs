//! Typed clients for downstream services (Driven Adapters)
//!
//! Each client resolves its peer through the service registry and makes
//! exactly one HTTP attempt. Fallback behavior lives above these, in
//! the catalog service's guards.

use std::sync::Arc;

use async_trait::async_trait;
use matinee_connect::{JsonClient, RemoteCallError, ServiceRegistry};

use crate::models::{Movie, UserRating};

/// Logical name of the rating service in the registry.
pub const RATING_SERVICE: &str = "movie-rating-service";

/// Logical name of the movie info service in the registry.
pub const MOVIE_INFO_SERVICE: &str = "movie-info-service";

/// Port for fetching a user's ratings.
#[async_trait]
pub trait RatingsPort: Send + Sync {
    /// Fetch all ratings for a user.
    async fn user_rating(&self, user_id: &str) -> Result<UserRating, RemoteCallError>;
}

/// Port for fetching movie metadata.
#[async_trait]
pub trait MovieInfoPort: Send + Sync {
    /// Fetch metadata for one movie.
    async fn movie(&self, movie_id: &str) -> Result<Movie, RemoteCallError>;
}

/// HTTP client for the rating service.
#[derive(Clone)]
pub struct RatingsClient {
    registry: Arc<dyn ServiceRegistry>,
    client: JsonClient,
}

impl RatingsClient {
    /// Create a client over a registry and a shared HTTP client.
    #[must_use]
    pub fn new(registry: Arc<dyn ServiceRegistry>, client: JsonClient) -> Self {
        Self { registry, client }
    }
}

#[async_trait]
impl RatingsPort for RatingsClient {
    async fn user_rating(&self, user_id: &str) -> Result<UserRating, RemoteCallError> {
        let base = self.registry.resolve(RATING_SERVICE).await?;
        self.client
            .get_json(&format!("{base}/ratings-data/users/{user_id}"))
            .await
    }
}

/// HTTP client for the movie info service.
#[derive(Clone)]
pub struct MovieInfoClient {
    registry: Arc<dyn ServiceRegistry>,
    client: JsonClient,
}

impl MovieInfoClient {
    /// Create a client over a registry and a shared HTTP client.
    #[must_use]
    pub fn new(registry: Arc<dyn ServiceRegistry>, client: JsonClient) -> Self {
        Self { registry, client }
    }
}

#[async_trait]
impl MovieInfoPort for MovieInfoClient {
    async fn movie(&self, movie_id: &str) -> Result<Movie, RemoteCallError> {
        let base = self.registry.resolve(MOVIE_INFO_SERVICE).await?;
        self.client.get_json(&format!("{base}/movies/{movie_id}")).await
    }
}
