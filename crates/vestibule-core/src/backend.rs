//! Backend seam for the send-code and verify operations.
//!
//! The controller never performs I/O; it emits dispatch effects and the
//! driver invokes an [`AuthBackend`] implementation, feeding the result back
//! as a completion event. Production wiring injects a simulated backend with
//! fixed latencies; tests inject scripted results to exercise both the
//! success and failure branches.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from backend operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    /// The service could not be reached or timed out.
    #[error("service unavailable: {reason}")]
    Unavailable {
        /// Description of the transport failure.
        reason: String,
    },

    /// The service answered and refused the request.
    #[error("request rejected: {reason}")]
    Rejected {
        /// Reason given by the service.
        reason: String,
    },
}

impl BackendError {
    /// Returns true if retrying the same request may succeed.
    ///
    /// Transport failures are retryable; an explicit rejection is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Unavailable { .. } => true,
            Self::Rejected { .. } => false,
        }
    }
}

/// Asynchronous sign-in operations.
///
/// The contract mirrors the form's two flows: both methods receive values
/// the controller has already validated, return after the operation's
/// latency, and report failure through [`BackendError`].
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Send an activation code to the given identity.
    async fn send_code(&self, identity: &str) -> Result<(), BackendError>;

    /// Verify an identity/code pair.
    async fn verify(&self, identity: &str, code: &str) -> Result<(), BackendError>;
}
