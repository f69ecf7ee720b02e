//! Environment abstraction for deterministic testing.
//!
//! The `Environment` trait decouples the form driver from system resources
//! (time, async sleeping). This enables:
//!
//! - Deterministic tests: a paused or virtual clock replays the countdown and
//!   the simulated backend latencies without real delays.
//!
//! - Production runtime: the tokio implementation uses real system time
//!   without any code changes to the controller or driver logic.
//!
//! The controller itself never touches the environment: it is a pure state
//! machine advanced by explicit events. Only driver code (and backend
//! implementations that simulate latency) sleep.
//!
//! # Invariants
//!
//! - Monotonicity: `env.now()` must never go backwards

use std::time::{Duration, Instant};

/// Abstract environment providing time and async sleeping.
///
/// Implementations MUST guarantee that `now()` never goes backwards within a
/// single execution context.
pub trait Environment: Clone + Send + Sync + 'static {
    /// Returns the current time.
    ///
    /// # Invariants
    ///
    /// - Monotonicity: subsequent calls must return times >= previous calls.
    fn now(&self) -> Instant;

    /// Sleeps for the specified duration.
    ///
    /// This is the ONLY async method in the trait, and it should only be used
    /// by driver code and simulated backends (not controller logic).
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;
}
