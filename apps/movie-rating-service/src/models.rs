//! Rating value objects.
//!
//! Request-scoped and immutable: built when a response is assembled,
//! discarded after serialization.

use serde::{Deserialize, Serialize};

/// A single movie rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    /// Movie identifier.
    pub movie_id: String,
    /// Score the user gave the movie.
    pub rating: i32,
}

impl Rating {
    /// Create a new rating.
    pub fn new(movie_id: impl Into<String>, rating: i32) -> Self {
        Self {
            movie_id: movie_id.into(),
            rating,
        }
    }
}

/// All ratings for one user, in the order they were recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRating {
    /// Ordered ratings.
    pub ratings: Vec<Rating>,
}

impl UserRating {
    /// Create a user rating aggregate.
    #[must_use]
    pub const fn new(ratings: Vec<Rating>) -> Self {
        Self { ratings }
    }
}
