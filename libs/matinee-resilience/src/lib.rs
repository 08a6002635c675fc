// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! Fault-tolerance primitives for Matinee services.
//!
//! Every service-to-service call in the demo goes through the same
//! wrapper: one attempt with a bounded timeout, then a caller-supplied
//! fallback. The wrapper never retries and never surfaces the remote
//! failure; only a failing fallback is fatal.
//!
//! - [`guard`]: the resilient call wrapper ([`FallbackGuard`]).
//! - [`circuit_breaker`]: optional fail-fast gate in front of a guard.

pub mod circuit_breaker;
pub mod guard;

pub use circuit_breaker::{
    CircuitBreaker, CircuitBreakerConfig, CircuitBreakerMetrics, CircuitBreakerState,
};
pub use guard::{DEFAULT_CALL_TIMEOUT, FallbackGuard};
