// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! Movie Info Service - Library
//!
//! Looks movies up in an external TMDB-style provider and maps the
//! provider's shape into the demo's `Movie` value object. The provider
//! call runs through a fallback guard, so an outage degrades answers to
//! a placeholder instead of failing the request.

/// Configuration from environment variables.
pub mod config;

/// Movie value objects.
pub mod models;

/// Movie lookup with provider fallback.
pub mod movies;

/// HTTP/JSON API server.
pub mod server;

/// External provider adapter.
pub mod tmdb;

pub use config::{Settings, TmdbSettings};
pub use models::{Movie, MovieSummary};
pub use movies::MovieService;
pub use server::{AppState, create_router};
pub use tmdb::{MovieSummaryPort, TmdbClient};
