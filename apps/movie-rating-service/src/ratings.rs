//! Hardcoded ratings data.
//!
//! Stand-in for a real ratings store: lookups are deterministic and
//! never fail.

use crate::models::{Rating, UserRating};

/// Score returned for every movie lookup.
const DEFAULT_SCORE: i32 = 4;

/// Rating for a single movie.
#[must_use]
pub fn movie_rating(movie_id: &str) -> Rating {
    Rating::new(movie_id, DEFAULT_SCORE)
}

/// All ratings for a user.
///
/// Every user gets the same two-movie history; the catalog service only
/// cares about the shape and the order.
#[must_use]
pub fn user_ratings(user_id: &str) -> UserRating {
    tracing::debug!(user_id = %user_id, "Serving canned user ratings");
    UserRating::new(vec![Rating::new("123", 4), Rating::new("456", 5)])
}
