//! Catalog assembly with per-call fallbacks.

use std::sync::Arc;
use std::time::Duration;

use matinee_resilience::{
    CircuitBreaker, CircuitBreakerConfig, CircuitBreakerMetrics, FallbackGuard,
};

use crate::clients::{MOVIE_INFO_SERVICE, MovieInfoPort, RATING_SERVICE, RatingsPort};
use crate::models::{CatalogItem, Rating, UserRating};

/// Builds a user's catalog from the two downstream services.
///
/// Both downstream calls are guarded: the ratings call degrades to a
/// sentinel aggregate, each movie lookup degrades to a placeholder
/// entry. The catalog itself therefore never fails.
pub struct CatalogService {
    ratings: Arc<dyn RatingsPort>,
    movie_info: Arc<dyn MovieInfoPort>,
    ratings_guard: FallbackGuard,
    movie_info_guard: FallbackGuard,
    breakers: [Arc<CircuitBreaker>; 2],
}

impl CatalogService {
    /// Wire the catalog service to its downstream ports.
    #[must_use]
    pub fn new(
        ratings: Arc<dyn RatingsPort>,
        movie_info: Arc<dyn MovieInfoPort>,
        call_timeout: Duration,
    ) -> Self {
        let ratings_breaker = Arc::new(CircuitBreaker::new(
            RATING_SERVICE,
            CircuitBreakerConfig::default(),
        ));
        let movie_info_breaker = Arc::new(CircuitBreaker::new(
            MOVIE_INFO_SERVICE,
            CircuitBreakerConfig::default(),
        ));

        Self {
            ratings,
            movie_info,
            ratings_guard: FallbackGuard::new(RATING_SERVICE, call_timeout)
                .with_circuit_breaker(Arc::clone(&ratings_breaker)),
            movie_info_guard: FallbackGuard::new(MOVIE_INFO_SERVICE, call_timeout)
                .with_circuit_breaker(Arc::clone(&movie_info_breaker)),
            breakers: [ratings_breaker, movie_info_breaker],
        }
    }

    /// Snapshot the downstream circuit breakers for the health endpoint.
    #[must_use]
    pub fn breaker_metrics(&self) -> Vec<CircuitBreakerMetrics> {
        self.breakers.iter().map(|b| b.metrics()).collect()
    }

    /// Assemble the catalog for one user.
    ///
    /// Output order follows the order of the user's ratings.
    pub async fn catalog_for(&self, user_id: &str) -> Vec<CatalogItem> {
        let user_rating = self
            .ratings_guard
            .run_or_else(|| self.ratings.user_rating(user_id), UserRating::not_found)
            .await;

        // Lookups run concurrently; join_all keeps the input order.
        let lookups = user_rating.ratings.iter().map(|rating| self.enrich(rating));
        futures::future::join_all(lookups).await
    }

    /// Enrich one rating with movie metadata.
    async fn enrich(&self, rating: &Rating) -> CatalogItem {
        self.movie_info_guard
            .run_or_else(
                || async {
                    self.movie_info
                        .movie(&rating.movie_id)
                        .await
                        .map(|movie| CatalogItem::enriched(&movie, rating.rating))
                },
                CatalogItem::placeholder,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use matinee_connect::RemoteCallError;
    use matinee_resilience::CircuitBreakerState;

    use super::*;
    use crate::models::Movie;

    struct StubRatings {
        fail: bool,
    }

    #[async_trait]
    impl RatingsPort for StubRatings {
        async fn user_rating(&self, _user_id: &str) -> Result<UserRating, RemoteCallError> {
            if self.fail {
                return Err(RemoteCallError::Network("connection refused".to_string()));
            }
            Ok(UserRating::new(vec![
                Rating::new("123", 4),
                Rating::new("456", 5),
            ]))
        }
    }

    struct StubMovies {
        fail_for: Option<&'static str>,
        fail_all: bool,
    }

    #[async_trait]
    impl MovieInfoPort for StubMovies {
        async fn movie(&self, movie_id: &str) -> Result<Movie, RemoteCallError> {
            if self.fail_all || self.fail_for == Some(movie_id) {
                return Err(RemoteCallError::Status {
                    status: 503,
                    body: "unavailable".to_string(),
                });
            }
            Ok(Movie {
                id: movie_id.to_string(),
                name: format!("Movie {movie_id}"),
                description: format!("Synopsis of {movie_id}"),
            })
        }
    }

    fn service(ratings_fail: bool, fail_for: Option<&'static str>, fail_all: bool) -> CatalogService {
        CatalogService::new(
            Arc::new(StubRatings { fail: ratings_fail }),
            Arc::new(StubMovies { fail_for, fail_all }),
            Duration::from_secs(1),
        )
    }

    #[tokio::test]
    async fn enriches_all_items_in_order() {
        let catalog = service(false, None, false).catalog_for("alice").await;

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].name, "Movie 123");
        assert_eq!(catalog[0].rating, 4);
        assert_eq!(catalog[1].name, "Movie 456");
        assert_eq!(catalog[1].rating, 5);
    }

    #[tokio::test]
    async fn partial_info_outage_degrades_only_the_failed_item() {
        let catalog = service(false, Some("456"), false).catalog_for("alice").await;

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].name, "Movie 123");
        assert_eq!(catalog[1], CatalogItem::placeholder());
    }

    #[tokio::test]
    async fn ratings_outage_degrades_to_single_placeholder() {
        // The sentinel aggregate has one rating whose movie lookup also
        // fails, so the whole catalog collapses to one placeholder.
        let catalog = service(true, None, true).catalog_for("alice").await;

        assert_eq!(catalog, vec![CatalogItem::placeholder()]);
    }

    #[tokio::test]
    async fn breaker_metrics_cover_both_downstreams() {
        let service = service(false, None, false);
        let _ = service.catalog_for("alice").await;

        let metrics = service.breaker_metrics();
        assert_eq!(metrics.len(), 2);
        assert!(metrics.iter().all(|m| m.state == CircuitBreakerState::Closed));
        assert!(metrics.iter().any(|m| m.name == RATING_SERVICE));
        assert!(metrics.iter().any(|m| m.name == MOVIE_INFO_SERVICE));
    }

    #[tokio::test]
    async fn repeated_outages_open_the_movie_info_breaker() {
        let service = service(false, None, true);

        // Default threshold is five consecutive failures; each request
        // records two (one per rating).
        for _ in 0..3 {
            let _ = service.catalog_for("alice").await;
        }

        let metrics = service.breaker_metrics();
        let info = metrics
            .iter()
            .find(|m| m.name == MOVIE_INFO_SERVICE)
            .unwrap();
        assert_eq!(info.state, CircuitBreakerState::Open);
    }
}
