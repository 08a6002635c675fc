//! Movie value objects.

use serde::{Deserialize, Serialize};

/// Movie metadata as the demo services exchange it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    /// Movie identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Synopsis.
    pub description: String,
}

impl Movie {
    /// Create a movie record.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
        }
    }

    /// Map a provider summary into the demo's shape.
    #[must_use]
    pub fn from_summary(summary: MovieSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.title,
            description: summary.overview,
        }
    }

    /// Placeholder returned when the provider is unavailable.
    #[must_use]
    pub fn placeholder(id: impl Into<String>) -> Self {
        Self::new(id, "No Movie", "")
    }
}

/// The external provider's response shape.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MovieSummary {
    /// Provider-side movie identifier.
    pub id: String,
    /// Title.
    pub title: String,
    /// Synopsis.
    pub overview: String,
}
