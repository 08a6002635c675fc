//! Service configuration, loaded from environment variables.

use std::time::Duration;

use matinee_resilience::DEFAULT_CALL_TIMEOUT;
use thiserror::Error;

/// Default HTTP server port.
pub const DEFAULT_HTTP_PORT: u16 = 8082;

/// Default provider base URL; the movie id is appended directly.
pub const DEFAULT_TMDB_URL: &str = "https://api.themoviedb.org/3/movie/";

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    /// Environment variable has empty value.
    #[error("environment variable {0} cannot be empty")]
    EmptyValue(String),
}

/// External provider settings.
#[derive(Clone)]
pub struct TmdbSettings {
    /// Base URL the movie id is appended to.
    pub base_url: String,
    /// Authorization header value.
    pub api_key: String,
    /// Optional language hint passed as a query parameter.
    pub lang: Option<String>,
}

impl std::fmt::Debug for TmdbSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("lang", &self.lang)
            .finish()
    }
}

/// Movie info service settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// HTTP server port.
    pub http_port: u16,
    /// Time budget for one provider call.
    pub call_timeout: Duration,
    /// Provider settings.
    pub tmdb: TmdbSettings,
}

impl Settings {
    /// Load settings from environment variables.
    ///
    /// `TMDB_API_KEY` is required; everything else falls back to a
    /// default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("TMDB_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("TMDB_API_KEY".to_string()))?;
        if api_key.is_empty() {
            return Err(ConfigError::EmptyValue("TMDB_API_KEY".to_string()));
        }

        let base_url =
            std::env::var("TMDB_URL").unwrap_or_else(|_| DEFAULT_TMDB_URL.to_string());
        let lang = std::env::var("TMDB_LANG").ok().filter(|v| !v.is_empty());

        Ok(Self {
            http_port: parse_env_u16("MOVIE_INFO_HTTP_PORT", DEFAULT_HTTP_PORT),
            call_timeout: parse_env_duration_millis(
                "MOVIE_INFO_CALL_TIMEOUT_MS",
                DEFAULT_CALL_TIMEOUT,
            ),
            tmdb: TmdbSettings {
                base_url,
                api_key,
                lang,
            },
        })
    }
}

fn parse_env_u16(key: &str, default: u16) -> u16 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_env_duration_millis(key: &str, default: Duration) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map_or(default, Duration::from_millis)
}
