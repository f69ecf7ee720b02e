//! Events fed into the controller and effects it produces.
//!
//! The controller is advanced exclusively through [`FormEvent`] values and
//! answers with [`FormEffect`] values for the driver to execute. Timers are
//! one-shot: the controller re-arms the countdown tick itself for as long as
//! the lockout runs, so "cancelling" a timer is simply not re-arming it.

use std::time::Duration;

use crate::backend::BackendError;

/// One-shot timers the controller can arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    /// Fires once per second while the resend countdown runs.
    CountdownTick,
    /// Fires once between login success and navigation.
    RedirectDelay,
}

/// Events fed into the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// The identity field changed (every keystroke delivers the full value).
    IdentityChanged {
        /// Current raw field content.
        value: String,
    },

    /// The activation-code field changed.
    CodeChanged {
        /// Current raw field content.
        value: String,
    },

    /// The send/resend button was activated.
    SendPressed,

    /// The form was submitted.
    SubmitPressed,

    /// A dispatched send-code operation finished.
    SendCompleted {
        /// Outcome reported by the backend.
        result: Result<(), BackendError>,
    },

    /// A dispatched verify operation finished.
    VerifyCompleted {
        /// Outcome reported by the backend.
        result: Result<(), BackendError>,
    },

    /// An armed timer fired.
    TimerFired {
        /// Which timer fired.
        timer: Timer,
    },
}

/// Effects produced by the controller for the driver to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEffect {
    /// Invoke [`AuthBackend::send_code`](crate::AuthBackend::send_code) and
    /// feed the outcome back as [`FormEvent::SendCompleted`].
    DispatchSendCode {
        /// Validated, trimmed identity.
        identity: String,
    },

    /// Invoke [`AuthBackend::verify`](crate::AuthBackend::verify) and feed
    /// the outcome back as [`FormEvent::VerifyCompleted`].
    DispatchVerify {
        /// Validated, trimmed identity.
        identity: String,
        /// Validated, trimmed activation code.
        code: String,
    },

    /// Arm a one-shot timer; deliver [`FormEvent::TimerFired`] after `after`.
    StartTimer {
        /// Which timer to arm.
        timer: Timer,
        /// Delay before firing.
        after: Duration,
    },

    /// Leave the form: navigate to `target`. Emitted at most once.
    Navigate {
        /// Destination path including the query string.
        target: String,
    },
}
