//! Operations for model-based testing.
//!
//! Operations represent everything a user (or the clock) can do to the
//! form. They are generated randomly by proptest and applied to both the
//! model and the real controller world; results and observable states must
//! match after every operation.

use vestibule_core::ControllerError;

/// Operations that can be applied to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Replace the identity field content (a keystroke delivers the full
    /// value).
    SetIdentity {
        /// New raw field content.
        value: String,
    },

    /// Replace the activation-code field content.
    SetCode {
        /// New raw field content.
        value: String,
    },

    /// Activate the send/resend button.
    PressSend,

    /// Submit the form.
    PressSubmit,

    /// Advance simulated time.
    ///
    /// Fires due timers and completes in-flight operations in both the
    /// model and the real system.
    AdvanceTime {
        /// Milliseconds to advance.
        millis: u16,
    },
}

/// Result of applying an operation.
///
/// Used to compare model and real system behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    /// The operation was accepted (possibly as a visible no-op, e.g. a
    /// submit that only populated inline errors).
    Applied,

    /// The operation landed on a locked action and was refused.
    Rejected,

    /// The real controller reported a fatal error. The model never produces
    /// this; seeing it in a comparison is itself a bug report.
    Faulted(ControllerError),
}

impl OperationResult {
    /// Whether the operation was accepted.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}
