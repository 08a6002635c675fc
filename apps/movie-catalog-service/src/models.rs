//! Catalog value objects.
//!
//! Each service keeps its own copy of the shapes it exchanges; there is
//! no shared schema beyond the JSON itself.

use serde::{Deserialize, Serialize};

/// A single movie rating, as served by the rating service.
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

    /// Fallback aggregate when the rating service is unavailable.
    #[must_use]
    pub fn not_found() -> Self {
        Self::new(vec![Rating::new("Movie Not found", 0)])
    }
}

/// Movie metadata, as served by the movie info service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    /// Movie identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Synopsis.
    pub description: String,
}

/// One catalog entry: a rating merged with movie metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Movie display name.
    pub name: String,
    /// Synopsis.
    pub description: String,
    /// Score the user gave the movie.
    pub rating: i32,
}

impl CatalogItem {
    /// Merge movie metadata with a rating score.
    #[must_use]
    pub fn enriched(movie: &Movie, rating: i32) -> Self {
        Self {
            name: movie.name.clone(),
            description: movie.description.clone(),
            rating,
        }
    }

    /// Placeholder entry when the movie lookup fails.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            name: "No Movie".to_string(),
            description: String::new(),
            rating: 0,
        }
    }
}
