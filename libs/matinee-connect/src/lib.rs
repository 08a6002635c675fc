// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! Connectivity layer for Matinee services.
//!
//! - [`discovery`]: maps logical service names to base URLs. The demo
//!   backs it with static configuration; a real registry would plug in
//!   behind the same trait.
//! - [`client`]: a single-attempt JSON-over-HTTP client and the
//!   [`RemoteCallError`] taxonomy it produces. Retrying is deliberately
//!   absent here; resilience lives in the caller's fallback guard.

pub mod client;
pub mod discovery;

pub use client::{JsonClient, RemoteCallError};
pub use discovery::{DiscoveryError, ServiceRegistry, StaticRegistry};
