//! Resilient call wrapper: one attempt, a timeout, then a fallback.
//!
//! Annotation-driven fallback dispatch is re-architected here as an
//! explicit higher-order call: the operation, the fallback, and the
//! time budget are all passed in, nothing is wired up by name.
//!
//! # Contract
//!
//! - The operation gets exactly one attempt; there is no retry and no
//!   backoff.
//! - Any failure of the operation (network error, timeout, bad status,
//!   malformed body) is absorbed and the fallback result is returned.
//! - A failure of the fallback itself propagates unchanged; there is no
//!   second-level fallback.
//! - On timeout the in-flight future is dropped and its eventual
//!   result, if any, is discarded.
//!
//! # Example
//!
//! ```rust,ignore
//! use matinee_resilience::FallbackGuard;
//! use std::time::Duration;
//!
//! let guard = FallbackGuard::new("movie-info", Duration::from_secs(2));
//! let movie = guard
//!     .run_or_else(|| client.movie("123"), || Movie::placeholder("123"))
//!     .await;
//! ```

use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::circuit_breaker::CircuitBreaker;

/// Default time budget for a guarded call.
///
/// The upstream frameworks this replaces apply an implicit default; here
/// it is explicit and overridable per guard.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(2);

/// Executes a remote call with a bounded timeout and guarantees a result
/// is always produced, never an unhandled remote failure.
///
/// The guard itself is stateless and safe to reuse across calls; an
/// optional [`CircuitBreaker`] can be attached to fail fast while a
/// downstream service is known to be unhealthy. Callers must treat a
/// guarded call as potentially blocking for up to the timeout and should
/// not hold any shared lock across it.
#[derive(Debug, Clone)]
pub struct FallbackGuard {
    name: String,
    timeout: Duration,
    breaker: Option<Arc<CircuitBreaker>>,
}

impl FallbackGuard {
    /// Create a guard for the named downstream call.
    #[must_use]
    pub fn new(name: impl Into<String>, timeout: Duration) -> Self {
        Self {
            name: name.into(),
            timeout,
            breaker: None,
        }
    }

    /// Attach a circuit breaker.
    ///
    /// While the breaker rejects calls the guard skips the attempt and
    /// goes straight to the fallback; outcomes of attempted calls are
    /// recorded on the breaker.
    #[must_use]
    pub fn with_circuit_breaker(mut self, breaker: Arc<CircuitBreaker>) -> Self {
        self.breaker = Some(breaker);
        self
    }

    /// Get the call name used for logging and metrics.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the time budget for a single attempt.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run `op`, falling back to `fallback` on any failure or timeout.
    ///
    /// Returns `op`'s value if it completes within the time budget
    /// without failure. Otherwise the fallback runs; its error type is
    /// the only one the caller can observe.
    pub async fn run<T, E, FE, Fut, FbFut>(
        &self,
        op: impl FnOnce() -> Fut,
        fallback: impl FnOnce() -> FbFut,
    ) -> Result<T, FE>
    where
        Fut: Future<Output = Result<T, E>>,
        FbFut: Future<Output = Result<T, FE>>,
        E: std::fmt::Display,
    {
        if let Some(breaker) = &self.breaker
            && !breaker.is_call_permitted()
        {
            tracing::warn!(call = %self.name, "Circuit open, skipping call");
            metrics::counter!("guard_short_circuits_total", "call" => self.name.clone())
                .increment(1);
            return fallback().await;
        }

        match tokio::time::timeout(self.timeout, op()).await {
            Ok(Ok(value)) => {
                self.record(Outcome::Succeeded);
                Ok(value)
            }
            Ok(Err(e)) => {
                self.record(Outcome::FailedFallback);
                tracing::warn!(call = %self.name, error = %e, "Call failed, using fallback");
                fallback().await
            }
            Err(_elapsed) => {
                // The timed-out future is dropped here; whatever it
                // would have produced is discarded.
                self.record(Outcome::FailedFallback);
                tracing::warn!(
                    call = %self.name,
                    timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
                    "Call timed out, using fallback"
                );
                fallback().await
            }
        }
    }

    /// Run `op`, producing `fallback`'s value on any failure or timeout.
    ///
    /// The infallible form for call sites whose fallback is a fixed
    /// placeholder value.
    pub async fn run_or_else<T, E, Fut>(
        &self,
        op: impl FnOnce() -> Fut,
        fallback: impl FnOnce() -> T,
    ) -> T
    where
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let result = self
            .run(op, move || {
                std::future::ready(Ok::<_, Infallible>(fallback()))
            })
            .await;

        match result {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Record the terminal outcome of an attempted call.
    fn record(&self, outcome: Outcome) {
        if let Some(breaker) = &self.breaker {
            match outcome {
                Outcome::Succeeded => breaker.record_success(),
                Outcome::FailedFallback => breaker.record_failure(),
            }
        }

        let label = match outcome {
            Outcome::Succeeded => "success",
            Outcome::FailedFallback => "fallback",
        };
        metrics::counter!("guard_calls_total", "call" => self.name.clone(), "outcome" => label)
            .increment(1);
    }
}

/// Terminal states of a guarded call: one attempt, one hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Succeeded,
    FailedFallback,
}
