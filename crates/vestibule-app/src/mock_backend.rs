//! Fixed-latency stand-in for the real sign-in service.
//!
//! No network request happens: the backend sleeps for the configured latency
//! through the environment and reports success. Failure behavior is covered
//! by the harness crate's scripted backend; this one mirrors what the real
//! page did, where the simulated operations could not fail.

use std::time::Duration;

use async_trait::async_trait;
use vestibule_core::{AuthBackend, BackendError, Environment};

/// Default latency of the simulated send-code operation.
pub const DEFAULT_SEND_LATENCY: Duration = Duration::from_millis(1000);

/// Default latency of the simulated verify operation.
pub const DEFAULT_VERIFY_LATENCY: Duration = Duration::from_millis(600);

/// Simulated backend with fixed per-operation latencies.
#[derive(Clone)]
pub struct MockBackend<E: Environment> {
    env: E,
    send_latency: Duration,
    verify_latency: Duration,
}

impl<E: Environment> MockBackend<E> {
    /// Create a backend with the given latencies.
    pub fn new(env: E, send_latency: Duration, verify_latency: Duration) -> Self {
        Self { env, send_latency, verify_latency }
    }

    /// Create a backend with the default latencies.
    pub fn with_defaults(env: E) -> Self {
        Self::new(env, DEFAULT_SEND_LATENCY, DEFAULT_VERIFY_LATENCY)
    }
}

#[async_trait]
impl<E: Environment> AuthBackend for MockBackend<E> {
    async fn send_code(&self, identity: &str) -> Result<(), BackendError> {
        tracing::debug!(identity = %identity, "simulating activation code delivery");
        self.env.sleep(self.send_latency).await;
        Ok(())
    }

    async fn verify(&self, identity: &str, _code: &str) -> Result<(), BackendError> {
        tracing::debug!(identity = %identity, "simulating credential check");
        self.env.sleep(self.verify_latency).await;
        Ok(())
    }
}
