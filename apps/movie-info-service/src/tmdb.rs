//! External provider adapter (Driven Adapter)
//!
//! Fetches `MovieSummary` records from a TMDB-style HTTP API. The
//! adapter makes exactly one attempt per lookup; the fallback guard
//! above it decides what happens on failure.

use std::time::Duration;

use async_trait::async_trait;
use matinee_connect::{JsonClient, RemoteCallError};
use reqwest::header::{ACCEPT, AUTHORIZATION};

use crate::config::TmdbSettings;
use crate::models::MovieSummary;

/// Port for the external movie metadata provider.
#[async_trait]
pub trait MovieSummaryPort: Send + Sync {
    /// Fetch the provider's summary for one movie.
    async fn summary(&self, movie_id: &str) -> Result<MovieSummary, RemoteCallError>;
}

/// HTTP client for the TMDB-style provider.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: JsonClient,
    base_url: String,
    api_key: String,
    lang: Option<String>,
}

impl TmdbClient {
    /// Create a provider client from settings.
    pub fn new(settings: &TmdbSettings, timeout: Duration) -> Result<Self, RemoteCallError> {
        Ok(Self {
            client: JsonClient::new(timeout)?,
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
            lang: settings.lang.clone(),
        })
    }
}

#[async_trait]
impl MovieSummaryPort for TmdbClient {
    async fn summary(&self, movie_id: &str) -> Result<MovieSummary, RemoteCallError> {
        // The configured base URL ends with the resource path prefix;
        // the id is appended directly.
        let url = format!("{}{}", self.base_url, movie_id);

        let mut request = self
            .client
            .http()
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, &self.api_key);
        if let Some(lang) = &self.lang {
            request = request.query(&[("language", lang)]);
        }

        self.client.execute(request).await
    }
}
