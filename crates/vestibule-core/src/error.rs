//! Controller error types.

use thiserror::Error;

use crate::event::Timer;

/// Which asynchronous flow a completion event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// The send-activation-code flow.
    Send,
    /// The verify/login flow.
    Verify,
}

impl std::fmt::Display for Flow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Send => write!(f, "send"),
            Self::Verify => write!(f, "verify"),
        }
    }
}

/// Errors from controller operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ControllerError {
    /// Send was requested while the action is not available.
    #[error("send not available: {reason}")]
    SendUnavailable {
        /// Why the action is locked right now.
        reason: String,
    },

    /// Submit was requested while the action is not available.
    #[error("submit not available: {reason}")]
    SubmitUnavailable {
        /// Why the action is locked right now.
        reason: String,
    },

    /// A completion event arrived with no matching request in flight.
    #[error("{flow} completion arrived with no request in flight")]
    StrayCompletion {
        /// Flow the completion claimed to belong to.
        flow: Flow,
    },

    /// A timer fired that the controller never armed (or already consumed).
    #[error("timer {timer:?} fired while not armed")]
    StrayTimer {
        /// The unexpected timer.
        timer: Timer,
    },
}

impl ControllerError {
    /// Returns true if this error is fatal (unrecoverable).
    ///
    /// Fatal errors indicate a driver bug: events were delivered that the
    /// controller never asked for. Transient errors are ordinary races (a
    /// press landing on a locked action) and can be ignored.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::SendUnavailable { .. } | Self::SubmitUnavailable { .. } => false,
            Self::StrayCompletion { .. } | Self::StrayTimer { .. } => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locked_actions_are_transient() {
        let err = ControllerError::SendUnavailable { reason: "cooldown active".to_string() };
        assert!(!err.is_fatal());
    }

    #[test]
    fn stray_completion_is_fatal() {
        let err = ControllerError::StrayCompletion { flow: Flow::Verify };
        assert!(err.is_fatal());
    }

    #[test]
    fn error_display() {
        let err = ControllerError::StrayCompletion { flow: Flow::Send };
        assert_eq!(err.to_string(), "send completion arrived with no request in flight");
    }
}
