//! Service configuration, loaded from environment variables.

/// Default HTTP server port.
pub const DEFAULT_HTTP_PORT: u16 = 8083;

/// Rating service settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// HTTP server port.
    pub http_port: u16,
}

impl Settings {
    /// Load settings from environment variables, falling back to
    /// defaults for anything unset or unparsable.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            http_port: parse_env_u16("RATING_HTTP_PORT", DEFAULT_HTTP_PORT),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
        }
    }
}

fn parse_env_u16(key: &str, default: u16) -> u16 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
