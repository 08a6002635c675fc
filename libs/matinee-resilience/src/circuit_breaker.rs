//! Circuit breaker for downstream service calls.
//!
//! Lets a guard fail fast once a downstream service has produced enough
//! consecutive failures, instead of burning the full timeout on every
//! request while the service is down.
//!
//! # State Machine
//!
//! ```text
//! CLOSED → OPEN (consecutive failures >= threshold)
//! OPEN → HALF_OPEN (wait duration elapsed)
//! HALF_OPEN → CLOSED (probe calls succeed)
//! HALF_OPEN → OPEN (any probe fails)
//! ```

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Circuit breaker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CircuitBreakerState {
    /// Circuit is closed, calls flow normally.
    Closed,
    /// Circuit is open, calls are rejected.
    Open,
    /// Circuit is testing with a limited number of probe calls.
    HalfOpen,
}

impl std::fmt::Display for CircuitBreakerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Closed => write!(f, "CLOSED"),
            Self::Open => write!(f, "OPEN"),
            Self::HalfOpen => write!(f, "HALF_OPEN"),
        }
    }
}

/// Circuit breaker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures that open the circuit.
    pub failure_threshold: u32,
    /// Duration to stay in `OPEN` state before probing.
    pub wait_duration_in_open: Duration,
    /// Permitted probe calls in `HALF_OPEN` state.
    pub permitted_calls_in_half_open: u32,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            wait_duration_in_open: Duration::from_secs(10),
            permitted_calls_in_half_open: 3,
        }
    }
}

/// Mutable breaker state, updated under one lock.
#[derive(Debug)]
struct Inner {
    state: CircuitBreakerState,
    consecutive_failures: u32,
    opened_at: Option<Instant>,
    half_open_calls: u32,
    half_open_successes: u32,
}

/// Circuit breaker for a single downstream service.
#[derive(Debug)]
pub struct CircuitBreaker {
    /// Downstream service name for logging.
    name: String,
    config: CircuitBreakerConfig,
    inner: Mutex<Inner>,
    /// Total calls counter (for metrics).
    total_calls: AtomicU64,
    /// Total failures counter (for metrics).
    total_failures: AtomicU64,
    /// State transitions counter (for metrics).
    state_transitions: AtomicU64,
}

impl CircuitBreaker {
    /// Create a new circuit breaker.
    #[must_use]
    pub fn new(name: impl Into<String>, config: CircuitBreakerConfig) -> Self {
        Self {
            name: name.into(),
            config,
            inner: Mutex::new(Inner {
                state: CircuitBreakerState::Closed,
                consecutive_failures: 0,
                opened_at: None,
                half_open_calls: 0,
                half_open_successes: 0,
            }),
            total_calls: AtomicU64::new(0),
            total_failures: AtomicU64::new(0),
            state_transitions: AtomicU64::new(0),
        }
    }

    /// Get the downstream service name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the current state.
    #[must_use]
    pub fn state(&self) -> CircuitBreakerState {
        let mut inner = self.lock();
        self.refresh(&mut inner);
        inner.state
    }

    /// Check if a call is permitted.
    #[must_use]
    pub fn is_call_permitted(&self) -> bool {
        let mut inner = self.lock();
        self.refresh(&mut inner);

        match inner.state {
            CircuitBreakerState::Closed => true,
            CircuitBreakerState::Open => false,
            CircuitBreakerState::HalfOpen => {
                inner.half_open_calls < self.config.permitted_calls_in_half_open
            }
        }
    }

    /// Record a successful call.
    pub fn record_success(&self) {
        self.total_calls.fetch_add(1, Ordering::Relaxed);

        let mut inner = self.lock();
        self.refresh(&mut inner);

        match inner.state {
            CircuitBreakerState::Closed => {
                inner.consecutive_failures = 0;
            }
            CircuitBreakerState::HalfOpen => {
                inner.half_open_calls += 1;
                inner.half_open_successes += 1;
                if inner.half_open_successes >= self.config.permitted_calls_in_half_open {
                    self.transition(&mut inner, CircuitBreakerState::Closed);
                }
            }
            CircuitBreakerState::Open => {
                // Calls should be rejected while OPEN
                tracing::warn!(name = %self.name, "Success recorded while circuit is OPEN");
            }
        }
    }

    /// Record a failed call.
    pub fn record_failure(&self) {
        self.total_calls.fetch_add(1, Ordering::Relaxed);
        self.total_failures.fetch_add(1, Ordering::Relaxed);

        let mut inner = self.lock();
        self.refresh(&mut inner);

        match inner.state {
            CircuitBreakerState::Closed => {
                inner.consecutive_failures += 1;
                if inner.consecutive_failures >= self.config.failure_threshold {
                    self.transition(&mut inner, CircuitBreakerState::Open);
                }
            }
            CircuitBreakerState::HalfOpen => {
                inner.half_open_calls += 1;
                // Any probe failure reopens the circuit
                self.transition(&mut inner, CircuitBreakerState::Open);
            }
            CircuitBreakerState::Open => {
                tracing::warn!(name = %self.name, "Failure recorded while circuit is OPEN");
            }
        }
    }

    /// Force the circuit open (for testing or emergency).
    pub fn force_open(&self) {
        let mut inner = self.lock();
        if inner.state != CircuitBreakerState::Open {
            self.transition(&mut inner, CircuitBreakerState::Open);
        }
    }

    /// Force the circuit closed (for testing or recovery).
    pub fn force_close(&self) {
        let mut inner = self.lock();
        if inner.state != CircuitBreakerState::Closed {
            self.transition(&mut inner, CircuitBreakerState::Closed);
        }
    }

    /// Get a metrics snapshot for this circuit breaker.
    #[must_use]
    pub fn metrics(&self) -> CircuitBreakerMetrics {
        CircuitBreakerMetrics {
            name: self.name.clone(),
            state: self.state(),
            total_calls: self.total_calls.load(Ordering::Relaxed),
            total_failures: self.total_failures.load(Ordering::Relaxed),
            state_transitions: self.state_transitions.load(Ordering::Relaxed),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Apply the time-based `OPEN` -> `HALF_OPEN` transition.
    fn refresh(&self, inner: &mut Inner) {
        if inner.state == CircuitBreakerState::Open
            && let Some(opened) = inner.opened_at
            && opened.elapsed() >= self.config.wait_duration_in_open
        {
            self.transition(inner, CircuitBreakerState::HalfOpen);
        }
    }

    /// Move to a new state, resetting the counters that belong to it.
    fn transition(&self, inner: &mut Inner, to: CircuitBreakerState) {
        let from = inner.state;
        inner.state = to;

        match to {
            CircuitBreakerState::Open => {
                inner.opened_at = Some(Instant::now());
            }
            CircuitBreakerState::HalfOpen => {
                inner.half_open_calls = 0;
                inner.half_open_successes = 0;
            }
            CircuitBreakerState::Closed => {
                inner.consecutive_failures = 0;
                inner.opened_at = None;
            }
        }

        self.state_transitions.fetch_add(1, Ordering::Relaxed);
        metrics::counter!(
            "circuit_breaker_transitions_total",
            "name" => self.name.clone(),
            "to" => to.to_string()
        )
        .increment(1);

        if to == CircuitBreakerState::Open {
            tracing::warn!(name = %self.name, from = %from, to = %to, "Circuit breaker opened");
        } else {
            tracing::info!(name = %self.name, from = %from, to = %to, "Circuit breaker transition");
        }
    }
}

/// Metrics snapshot for a circuit breaker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitBreakerMetrics {
    /// Downstream service name.
    pub name: String,
    /// Current state.
    pub state: CircuitBreakerState,
    /// Total calls.
    pub total_calls: u64,
    /// Total failures.
    pub total_failures: u64,
    /// Number of state transitions.
    pub state_transitions: u64,
}
