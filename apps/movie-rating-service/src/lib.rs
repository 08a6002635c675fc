// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! Movie Rating Service - Library
//!
//! Serves per-movie and per-user ratings. Every answer is hardcoded or
//! trivially synthesized; the service exists so the catalog service has
//! something real to call.

/// Configuration from environment variables.
pub mod config;

/// Rating value objects.
pub mod models;

/// Hardcoded ratings data.
pub mod ratings;

/// HTTP/JSON API server.
pub mod server;

pub use config::Settings;
pub use models::{Rating, UserRating};
pub use server::{AppState, create_router};
