//! Service configuration, loaded from environment variables.

use std::time::Duration;

use matinee_resilience::DEFAULT_CALL_TIMEOUT;

/// Default HTTP server port.
pub const DEFAULT_HTTP_PORT: u16 = 8081;

/// Default base URL of the rating service.
pub const DEFAULT_RATING_SERVICE_URL: &str = "http://localhost:8083";

/// Default base URL of the movie info service.
pub const DEFAULT_MOVIE_INFO_URL: &str = "http://localhost:8082";

/// Catalog service settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// HTTP server port.
    pub http_port: u16,
    /// Base URL the registry maps the rating service to.
    pub rating_service_url: String,
    /// Base URL the registry maps the movie info service to.
    pub movie_info_url: String,
    /// Time budget for one downstream call.
    pub call_timeout: Duration,
}

impl Settings {
    /// Load settings from environment variables, falling back to
    /// defaults for anything unset or unparsable.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            http_port: parse_env_u16("CATALOG_HTTP_PORT", DEFAULT_HTTP_PORT),
            rating_service_url: std::env::var("CATALOG_RATING_SERVICE_URL")
                .unwrap_or_else(|_| DEFAULT_RATING_SERVICE_URL.to_string()),
            movie_info_url: std::env::var("CATALOG_MOVIE_INFO_URL")
                .unwrap_or_else(|_| DEFAULT_MOVIE_INFO_URL.to_string()),
            call_timeout: parse_env_duration_millis(
                "CATALOG_CALL_TIMEOUT_MS",
                DEFAULT_CALL_TIMEOUT,
            ),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            rating_service_url: DEFAULT_RATING_SERVICE_URL.to_string(),
            movie_info_url: DEFAULT_MOVIE_INFO_URL.to_string(),
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
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
