//! Service discovery seam.
//!
//! The only capability the services need from a registry is
//! `resolve(serviceName) -> base URL`. Registration, heartbeats and
//! replication belong to the registry itself and stay behind this trait.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from service name resolution.
#[derive(Debug, Clone, Error)]
pub enum DiscoveryError {
    /// No address is known for the requested service.
    #[error("unknown service: {0}")]
    UnknownService(String),
}

/// Maps a logical service name to a base URL.
#[async_trait]
pub trait ServiceRegistry: Send + Sync {
    /// Resolve a service name to a base URL (no trailing slash).
    async fn resolve(&self, service: &str) -> Result<String, DiscoveryError>;
}

/// Registry backed by a fixed name → URL table from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    routes: HashMap<String, String>,
}

impl StaticRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route for a service name.
    #[must_use]
    pub fn with_route(mut self, service: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        self.routes
            .insert(service.into(), base_url.trim_end_matches('/').to_string());
        self
    }
}

#[async_trait]
impl ServiceRegistry for StaticRegistry {
    async fn resolve(&self, service: &str) -> Result<String, DiscoveryError> {
        self.routes
            .get(service)
            .cloned()
            .ok_or_else(|| DiscoveryError::UnknownService(service.to_string()))
    }
}
