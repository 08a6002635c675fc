// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! Movie Catalog Service - Library
//!
//! Builds a user's catalog by fetching their ratings from the rating
//! service and enriching each rating with metadata from the movie info
//! service. Both downstream calls run through fallback guards with
//! circuit breakers: a downstream outage degrades entries to
//! placeholders, the request itself always succeeds.

/// Catalog assembly with per-call fallbacks.
pub mod catalog;

/// Typed clients for downstream services.
pub mod clients;

/// Configuration from environment variables.
pub mod config;

/// Catalog value objects.
pub mod models;

/// HTTP/JSON API server.
pub mod server;

pub use catalog::CatalogService;
pub use clients::{MOVIE_INFO_SERVICE, MovieInfoPort, RATING_SERVICE, RatingsPort};
pub use config::Settings;
pub use models::{CatalogItem, Movie, Rating, UserRating};
pub use server::{AppState, create_router};
