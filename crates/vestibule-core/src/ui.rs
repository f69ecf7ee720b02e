//! UI projection.
//!
//! [`UiState`] is the entire visible surface of the form, recomputed from
//! controller state in a single pure step. The driver renders whatever this
//! projection says after every handled event; no other code path decides
//! labels, enablement, or messages.

use crate::{
    controller::{FormController, SendPhase, StatusLine, SubmitPhase},
    validation::{is_valid_code, is_valid_identity},
};

/// Send-button label before any code was sent.
pub const LABEL_SEND: &str = "Send Activation Code";

/// Send-button label after at least one successful send.
pub const LABEL_RESEND: &str = "Resend Activation Code";

/// Send-button label while a send is in flight.
pub const LABEL_SENDING: &str = "Sending…";

/// Submit-button label while editing.
pub const LABEL_SIGN_IN: &str = "Sign In";

/// Submit-button label from dispatching verification until navigation.
pub const LABEL_VERIFYING: &str = "Verifying…";

/// Inline message for an unacceptable identity.
pub const MSG_IDENTITY_INVALID: &str =
    "Please enter a valid @wustl.edu email or a username (≥ 3 chars).";

/// Inline message for an unacceptable activation code.
pub const MSG_CODE_INVALID: &str = "Please enter the 6-digit activation code.";

/// Status message after a successful send.
pub const MSG_CODE_SENT: &str = "Activation code sent to your WashU email.";

/// Status message after a successful verification.
pub const MSG_LOGIN_OK: &str = "Login successful. Redirecting…";

/// Snapshot of the visible form surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    /// Send-button label.
    pub send_label: String,
    /// Whether the send button accepts activation.
    pub send_enabled: bool,
    /// Submit-button label.
    pub submit_label: String,
    /// Whether the submit button accepts activation.
    pub submit_enabled: bool,
    /// Inline error under the identity field.
    pub identity_error: Option<String>,
    /// Inline error under the activation-code field.
    pub code_error: Option<String>,
    /// Global status line.
    pub status: Option<String>,
    /// Countdown line while the resend lockout runs.
    pub countdown: Option<String>,
}

impl UiState {
    /// Recompute the full surface from controller state.
    pub(crate) fn project(form: &FormController) -> Self {
        let identity_ok = is_valid_identity(form.identity());
        let code_ok = is_valid_code(form.code());

        let (send_label, send_enabled) = match (form.send_phase(), form.countdown().remaining()) {
            (SendPhase::Sending, _) => (LABEL_SENDING.to_string(), false),
            (SendPhase::Idle, Some(remaining)) => (format!("Resend in {remaining}s"), false),
            (SendPhase::Idle, None) => {
                let label = if form.code_requested() { LABEL_RESEND } else { LABEL_SEND };
                (label.to_string(), identity_ok)
            },
        };

        let (submit_label, submit_enabled) = match form.submit_phase() {
            SubmitPhase::Editing => (LABEL_SIGN_IN.to_string(), identity_ok && code_ok),
            SubmitPhase::Verifying | SubmitPhase::Redirecting { .. } => {
                (LABEL_VERIFYING.to_string(), false)
            },
        };

        let status = match form.status() {
            StatusLine::Empty => None,
            StatusLine::CodeSent => Some(MSG_CODE_SENT.to_string()),
            StatusLine::SendFailed(err) => Some(format!("Could not send activation code: {err}")),
            StatusLine::LoginSucceeded => Some(MSG_LOGIN_OK.to_string()),
            StatusLine::VerifyFailed(err) => Some(format!("Sign-in failed: {err}")),
        };

        Self {
            send_label,
            send_enabled,
            submit_label,
            submit_enabled,
            identity_error: form.identity_error().map(|_| MSG_IDENTITY_INVALID.to_string()),
            code_error: form.code_error().map(|_| MSG_CODE_INVALID.to_string()),
            status,
            countdown: form
                .countdown()
                .remaining()
                .map(|remaining| format!("Resend available in {remaining}s…")),
        }
    }
}
