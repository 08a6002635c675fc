//! Movie lookup with provider fallback.

use std::sync::Arc;
use std::time::Duration;

use matinee_resilience::FallbackGuard;

use crate::models::Movie;
use crate::tmdb::MovieSummaryPort;

/// Looks movies up in the external provider, degrading to a placeholder
/// when the provider fails or exceeds its time budget.
pub struct MovieService {
    provider: Arc<dyn MovieSummaryPort>,
    guard: FallbackGuard,
}

impl MovieService {
    /// Create a movie service over a provider.
    #[must_use]
    pub fn new(provider: Arc<dyn MovieSummaryPort>, call_timeout: Duration) -> Self {
        Self {
            provider,
            guard: FallbackGuard::new("tmdb", call_timeout),
        }
    }

    /// Look up one movie. Never fails; provider outages produce
    /// `Movie::placeholder`.
    pub async fn movie(&self, movie_id: &str) -> Movie {
        self.guard
            .run_or_else(
                || async {
                    self.provider
                        .summary(movie_id)
                        .await
                        .map(Movie::from_summary)
                },
                || Movie::placeholder(movie_id),
            )
            .await
    }
}
