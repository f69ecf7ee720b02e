//! Form controller state machine.
//!
//! The controller owns all form state: field values, inline validation
//! errors, the send and submit flow phases, the resend countdown, and the
//! status line. It is advanced exclusively by [`FormEvent`]s and produces
//! [`FormEffect`]s for the driver to execute.
//!
//! Pure state machine - returns effects, caller handles I/O. Callers render
//! by projecting [`UiState`](crate::UiState) after every handled event;
//! nothing here writes to a UI directly.
//!
//! # Invariants
//!
//! - Send is actionable iff the identity is valid, no send is in flight, and
//!   no countdown is running. A running countdown locks resend regardless of
//!   identity validity.
//! - Submit is actionable iff both fields are valid and the submit flow is
//!   still editing. An in-flight verify keeps submit locked even while the
//!   fields stay valid.
//! - A send in flight and a running countdown never overlap: the countdown
//!   starts only when a send completes successfully.
//! - The send and submit flows are not mutually exclusive; each locks only
//!   its own action.
//! - `Navigate` is emitted at most once.

use std::time::Duration;

use crate::{
    backend::BackendError,
    countdown::{Countdown, Tick},
    error::{ControllerError, Flow},
    event::{FormEffect, FormEvent, Timer},
    navigation::redirect_target,
    ui::UiState,
    validation::{CodeError, IdentityError, validate_code, validate_identity},
};

/// Interval between countdown ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Controller configuration.
#[derive(Debug, Clone)]
pub struct FormConfig {
    /// Resend lockout after a successful send, in whole seconds.
    pub cooldown_secs: u32,
    /// Delay between login success and navigation.
    pub redirect_delay: Duration,
    /// Navigation destination path (query string is appended).
    pub destination: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            cooldown_secs: 60,
            redirect_delay: Duration::from_millis(600),
            destination: "/dashboard".to_string(),
        }
    }
}

/// Send-activation-code flow phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SendPhase {
    /// No send in flight.
    #[default]
    Idle,
    /// A send-code operation was dispatched and has not completed.
    Sending,
}

/// Submit/login flow phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    /// Fields are editable and submit follows field validity.
    #[default]
    Editing,
    /// A verify operation was dispatched and has not completed.
    Verifying,
    /// Verification succeeded; waiting out the redirect delay. Terminal.
    Redirecting {
        /// Whether the navigation effect has been emitted.
        navigated: bool,
    },
}

/// Semantic content of the global status line.
///
/// Rendering to text happens in the UI projection; state only records what
/// happened.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusLine {
    /// Nothing to report.
    #[default]
    Empty,
    /// The activation code was sent.
    CodeSent,
    /// Sending the activation code failed.
    SendFailed(BackendError),
    /// Verification succeeded; navigation is imminent.
    LoginSucceeded,
    /// Verification failed.
    VerifyFailed(BackendError),
}

/// Form controller state machine.
///
/// Create with [`FormController::new`], feed events through
/// [`FormController::handle`], and render via [`FormController::ui`].
#[derive(Debug, Clone)]
pub struct FormController {
    config: FormConfig,
    identity: String,
    code: String,
    identity_error: Option<IdentityError>,
    code_error: Option<CodeError>,
    send_phase: SendPhase,
    submit_phase: SubmitPhase,
    countdown: Countdown,
    status: StatusLine,
    code_requested: bool,
}

impl FormController {
    /// Create a controller with the given configuration.
    pub fn new(config: FormConfig) -> Self {
        Self {
            config,
            identity: String::new(),
            code: String::new(),
            identity_error: None,
            code_error: None,
            send_phase: SendPhase::Idle,
            submit_phase: SubmitPhase::Editing,
            countdown: Countdown::Idle,
            status: StatusLine::Empty,
            code_requested: false,
        }
    }

    /// Current raw identity field content.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Current raw activation-code field content.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Inline identity error, if one is currently shown.
    pub fn identity_error(&self) -> Option<IdentityError> {
        self.identity_error
    }

    /// Inline activation-code error, if one is currently shown.
    pub fn code_error(&self) -> Option<CodeError> {
        self.code_error
    }

    /// Send flow phase.
    pub fn send_phase(&self) -> SendPhase {
        self.send_phase
    }

    /// Submit flow phase.
    pub fn submit_phase(&self) -> SubmitPhase {
        self.submit_phase
    }

    /// Resend countdown state.
    pub fn countdown(&self) -> Countdown {
        self.countdown
    }

    /// Status line content.
    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    /// Whether an activation code has ever been sent successfully.
    ///
    /// Picks the send-button wording (send vs resend).
    pub fn code_requested(&self) -> bool {
        self.code_requested
    }

    /// Controller configuration.
    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Project the full UI surface from current state.
    pub fn ui(&self) -> UiState {
        UiState::project(self)
    }

    /// Process an event and return resulting effects.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError` if the event cannot be processed. Transient
    /// errors (a press on a locked action) may be ignored by the driver;
    /// fatal ones indicate a driver bug.
    pub fn handle(&mut self, event: FormEvent) -> Result<Vec<FormEffect>, ControllerError> {
        match event {
            FormEvent::IdentityChanged { value } => {
                self.handle_identity_changed(value);
                Ok(Vec::new())
            },
            FormEvent::CodeChanged { value } => {
                self.handle_code_changed(value);
                Ok(Vec::new())
            },
            FormEvent::SendPressed => self.handle_send_pressed(),
            FormEvent::SubmitPressed => self.handle_submit_pressed(),
            FormEvent::SendCompleted { result } => self.handle_send_completed(result),
            FormEvent::VerifyCompleted { result } => self.handle_verify_completed(result),
            FormEvent::TimerFired { timer } => self.handle_timer(timer),
        }
    }

    fn handle_identity_changed(&mut self, value: String) {
        self.identity_error = validate_identity(&value).err();
        self.identity = value;
    }

    fn handle_code_changed(&mut self, value: String) {
        self.code_error = validate_code(&value).err();
        self.code = value;
    }

    fn handle_send_pressed(&mut self) -> Result<Vec<FormEffect>, ControllerError> {
        if self.send_phase == SendPhase::Sending {
            return Err(ControllerError::SendUnavailable {
                reason: "send already in flight".to_string(),
            });
        }
        if self.countdown.is_running() {
            return Err(ControllerError::SendUnavailable {
                reason: "resend cooldown active".to_string(),
            });
        }
        if validate_identity(&self.identity).is_err() {
            return Err(ControllerError::SendUnavailable {
                reason: "identity is not valid".to_string(),
            });
        }

        self.send_phase = SendPhase::Sending;
        let identity = self.identity.trim().to_string();
        tracing::debug!(identity = %identity, "dispatching activation code send");
        Ok(vec![FormEffect::DispatchSendCode { identity }])
    }

    fn handle_send_completed(
        &mut self,
        result: Result<(), BackendError>,
    ) -> Result<Vec<FormEffect>, ControllerError> {
        if self.send_phase != SendPhase::Sending {
            return Err(ControllerError::StrayCompletion { flow: Flow::Send });
        }
        self.send_phase = SendPhase::Idle;

        match result {
            Ok(()) => {
                tracing::debug!(cooldown_secs = self.config.cooldown_secs, "activation code sent");
                self.status = StatusLine::CodeSent;
                self.code_requested = true;
                self.countdown = Countdown::start(self.config.cooldown_secs);
                if self.countdown.is_running() {
                    Ok(vec![FormEffect::StartTimer {
                        timer: Timer::CountdownTick,
                        after: TICK_INTERVAL,
                    }])
                } else {
                    Ok(Vec::new())
                }
            },
            Err(err) => {
                // Restore the button, surface the failure, leave the
                // countdown untouched.
                tracing::warn!(error = %err, "activation code send failed");
                self.status = StatusLine::SendFailed(err);
                Ok(Vec::new())
            },
        }
    }

    fn handle_submit_pressed(&mut self) -> Result<Vec<FormEffect>, ControllerError> {
        match self.submit_phase {
            SubmitPhase::Verifying => {
                return Err(ControllerError::SubmitUnavailable {
                    reason: "verification in flight".to_string(),
                });
            },
            SubmitPhase::Redirecting { .. } => {
                return Err(ControllerError::SubmitUnavailable {
                    reason: "login already completed".to_string(),
                });
            },
            SubmitPhase::Editing => {},
        }

        self.identity_error = validate_identity(&self.identity).err();
        self.code_error = validate_code(&self.code).err();
        if self.identity_error.is_some() || self.code_error.is_some() {
            // The only terminal failure path of the submit flow: stay in
            // editing with the inline messages populated.
            return Ok(Vec::new());
        }

        self.submit_phase = SubmitPhase::Verifying;
        let identity = self.identity.trim().to_string();
        let code = self.code.trim().to_string();
        tracing::debug!(identity = %identity, "dispatching verification");
        Ok(vec![FormEffect::DispatchVerify { identity, code }])
    }

    fn handle_verify_completed(
        &mut self,
        result: Result<(), BackendError>,
    ) -> Result<Vec<FormEffect>, ControllerError> {
        if self.submit_phase != SubmitPhase::Verifying {
            return Err(ControllerError::StrayCompletion { flow: Flow::Verify });
        }

        match result {
            Ok(()) => {
                tracing::debug!("verification succeeded");
                self.submit_phase = SubmitPhase::Redirecting { navigated: false };
                self.status = StatusLine::LoginSucceeded;
                Ok(vec![FormEffect::StartTimer {
                    timer: Timer::RedirectDelay,
                    after: self.config.redirect_delay,
                }])
            },
            Err(err) => {
                // Restore the button, surface the failure, do not advance
                // towards navigation.
                tracing::warn!(error = %err, "verification failed");
                self.submit_phase = SubmitPhase::Editing;
                self.status = StatusLine::VerifyFailed(err);
                Ok(Vec::new())
            },
        }
    }

    fn handle_timer(&mut self, timer: Timer) -> Result<Vec<FormEffect>, ControllerError> {
        match timer {
            Timer::CountdownTick => match self.countdown.tick() {
                None => Err(ControllerError::StrayTimer { timer }),
                Some(Tick::Running { remaining }) => {
                    tracing::trace!(remaining, "resend countdown tick");
                    Ok(vec![FormEffect::StartTimer {
                        timer: Timer::CountdownTick,
                        after: TICK_INTERVAL,
                    }])
                },
                Some(Tick::Expired) => {
                    tracing::debug!("resend countdown expired");
                    Ok(Vec::new())
                },
            },
            Timer::RedirectDelay => match self.submit_phase {
                SubmitPhase::Redirecting { navigated: false } => {
                    self.submit_phase = SubmitPhase::Redirecting { navigated: true };
                    let target = self.redirect_target();
                    tracing::debug!(target = %target, "navigating");
                    Ok(vec![FormEffect::Navigate { target }])
                },
                _ => Err(ControllerError::StrayTimer { timer }),
            },
        }
    }

    /// Destination path with the derived username as query parameter.
    ///
    /// Reads the identity field at navigation time, so edits made during the
    /// redirect delay are reflected.
    fn redirect_target(&self) -> String {
        redirect_target(&self.config.destination, &self.identity)
    }
}

impl Default for FormController {
    fn default() -> Self {
        Self::new(FormConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(value: &str) -> FormEvent {
        FormEvent::IdentityChanged { value: value.to_string() }
    }

    fn code(value: &str) -> FormEvent {
        FormEvent::CodeChanged { value: value.to_string() }
    }

    fn accept(form: &mut FormController, event: FormEvent) -> Vec<FormEffect> {
        form.handle(event).expect("event should be accepted")
    }

    #[test]
    fn fresh_form_has_everything_locked() {
        let form = FormController::default();
        let ui = form.ui();
        assert!(!ui.send_enabled);
        assert!(!ui.submit_enabled);
        assert!(ui.identity_error.is_none());
        assert!(ui.code_error.is_none());
    }

    #[test]
    fn valid_identity_and_code_enable_submit() {
        let mut form = FormController::default();
        accept(&mut form, identity("bob@wustl.edu"));
        accept(&mut form, code("123456"));
        assert!(form.ui().submit_enabled);
    }

    #[test]
    fn short_username_keeps_submit_locked() {
        let mut form = FormController::default();
        accept(&mut form, identity("bo"));
        accept(&mut form, code("123456"));
        assert!(!form.ui().submit_enabled);
    }

    #[test]
    fn input_events_are_idempotent() {
        let mut form = FormController::default();
        accept(&mut form, identity("bo"));
        let first = form.ui();
        accept(&mut form, identity("bo"));
        assert_eq!(form.ui(), first);
    }

    #[test]
    fn send_press_dispatches_and_locks() {
        let mut form = FormController::default();
        accept(&mut form, identity("carol@wustl.edu"));
        assert!(form.ui().send_enabled);

        let effects = accept(&mut form, FormEvent::SendPressed);
        assert_eq!(
            effects,
            vec![FormEffect::DispatchSendCode { identity: "carol@wustl.edu".to_string() }]
        );
        let ui = form.ui();
        assert!(!ui.send_enabled);
        assert_eq!(ui.send_label, "Sending…");
    }

    #[test]
    fn send_press_while_locked_is_transient_error() {
        let mut form = FormController::default();
        accept(&mut form, identity("carol@wustl.edu"));
        accept(&mut form, FormEvent::SendPressed);

        let err = form.handle(FormEvent::SendPressed).expect_err("send is in flight");
        assert!(!err.is_fatal());
    }

    #[test]
    fn send_press_with_invalid_identity_is_rejected() {
        let mut form = FormController::default();
        accept(&mut form, identity("bo"));
        let err = form.handle(FormEvent::SendPressed).expect_err("identity invalid");
        assert!(matches!(err, ControllerError::SendUnavailable { .. }));
    }

    #[test]
    fn successful_send_starts_countdown() {
        let mut form = FormController::default();
        accept(&mut form, identity("carol@wustl.edu"));
        accept(&mut form, FormEvent::SendPressed);

        let effects = accept(&mut form, FormEvent::SendCompleted { result: Ok(()) });
        assert_eq!(
            effects,
            vec![FormEffect::StartTimer { timer: Timer::CountdownTick, after: TICK_INTERVAL }]
        );
        assert_eq!(form.countdown(), Countdown::Running { remaining: 60 });

        let ui = form.ui();
        assert!(!ui.send_enabled);
        assert_eq!(ui.send_label, "Resend in 60s");
        assert_eq!(ui.countdown.as_deref(), Some("Resend available in 60s…"));
        assert_eq!(ui.status.as_deref(), Some("Activation code sent to your WashU email."));
    }

    #[test]
    fn countdown_runs_to_completion_and_unlocks() {
        let mut form = FormController::default();
        accept(&mut form, identity("carol@wustl.edu"));
        accept(&mut form, FormEvent::SendPressed);
        accept(&mut form, FormEvent::SendCompleted { result: Ok(()) });

        for expected in (1..60).rev() {
            let effects = accept(&mut form, FormEvent::TimerFired { timer: Timer::CountdownTick });
            assert_eq!(
                effects,
                vec![FormEffect::StartTimer { timer: Timer::CountdownTick, after: TICK_INTERVAL }]
            );
            assert_eq!(form.countdown(), Countdown::Running { remaining: expected });
            assert_eq!(form.ui().send_label, format!("Resend in {expected}s"));
        }

        let effects = accept(&mut form, FormEvent::TimerFired { timer: Timer::CountdownTick });
        assert!(effects.is_empty());
        assert_eq!(form.countdown(), Countdown::Idle);

        let ui = form.ui();
        assert!(ui.send_enabled);
        assert_eq!(ui.send_label, "Resend Activation Code");
        assert!(ui.countdown.is_none());
    }

    #[test]
    fn countdown_expiry_respects_current_identity() {
        let mut form = FormController::new(FormConfig { cooldown_secs: 1, ..Default::default() });
        accept(&mut form, identity("carol@wustl.edu"));
        accept(&mut form, FormEvent::SendPressed);
        accept(&mut form, FormEvent::SendCompleted { result: Ok(()) });

        // Identity turns invalid while the countdown runs.
        accept(&mut form, identity("bo"));
        accept(&mut form, FormEvent::TimerFired { timer: Timer::CountdownTick });

        assert_eq!(form.countdown(), Countdown::Idle);
        assert!(!form.ui().send_enabled);
    }

    #[test]
    fn send_failure_restores_button_without_countdown() {
        let mut form = FormController::default();
        accept(&mut form, identity("carol@wustl.edu"));
        accept(&mut form, FormEvent::SendPressed);

        let err = BackendError::Unavailable { reason: "timeout".to_string() };
        let effects =
            accept(&mut form, FormEvent::SendCompleted { result: Err(err.clone()) });
        assert!(effects.is_empty());
        assert_eq!(form.countdown(), Countdown::Idle);
        assert_eq!(form.status(), &StatusLine::SendFailed(err));

        let ui = form.ui();
        assert!(ui.send_enabled);
        assert_eq!(ui.send_label, "Send Activation Code");
    }

    #[test]
    fn invalid_submit_populates_inline_errors() {
        let mut form = FormController::default();
        let effects = accept(&mut form, FormEvent::SubmitPressed);
        assert!(effects.is_empty());
        assert_eq!(form.submit_phase(), SubmitPhase::Editing);

        let ui = form.ui();
        assert!(ui.identity_error.is_some());
        assert!(ui.code_error.is_some());
    }

    #[test]
    fn valid_submit_dispatches_verification() {
        let mut form = FormController::default();
        accept(&mut form, identity("dave@wustl.edu"));
        accept(&mut form, code("654321"));

        let effects = accept(&mut form, FormEvent::SubmitPressed);
        assert_eq!(
            effects,
            vec![FormEffect::DispatchVerify {
                identity: "dave@wustl.edu".to_string(),
                code: "654321".to_string(),
            }]
        );
        let ui = form.ui();
        assert!(!ui.submit_enabled);
        assert_eq!(ui.submit_label, "Verifying…");
    }

    #[test]
    fn verify_success_schedules_redirect_then_navigates() {
        let mut form = FormController::default();
        accept(&mut form, identity("dave@wustl.edu"));
        accept(&mut form, code("654321"));
        accept(&mut form, FormEvent::SubmitPressed);

        let effects = accept(&mut form, FormEvent::VerifyCompleted { result: Ok(()) });
        assert_eq!(
            effects,
            vec![FormEffect::StartTimer {
                timer: Timer::RedirectDelay,
                after: Duration::from_millis(600),
            }]
        );
        assert_eq!(form.ui().status.as_deref(), Some("Login successful. Redirecting…"));

        let effects = accept(&mut form, FormEvent::TimerFired { timer: Timer::RedirectDelay });
        assert_eq!(
            effects,
            vec![FormEffect::Navigate { target: "/dashboard?user=dave".to_string() }]
        );
    }

    #[test]
    fn redirect_target_encodes_username() {
        let mut form = FormController::default();
        accept(&mut form, identity("dave smith"));
        accept(&mut form, code("654321"));
        accept(&mut form, FormEvent::SubmitPressed);
        accept(&mut form, FormEvent::VerifyCompleted { result: Ok(()) });

        let effects = accept(&mut form, FormEvent::TimerFired { timer: Timer::RedirectDelay });
        assert_eq!(
            effects,
            vec![FormEffect::Navigate { target: "/dashboard?user=dave%20smith".to_string() }]
        );
    }

    #[test]
    fn verify_failure_returns_to_editing() {
        let mut form = FormController::default();
        accept(&mut form, identity("dave@wustl.edu"));
        accept(&mut form, code("654321"));
        accept(&mut form, FormEvent::SubmitPressed);

        let err = BackendError::Rejected { reason: "wrong code".to_string() };
        let effects =
            accept(&mut form, FormEvent::VerifyCompleted { result: Err(err.clone()) });
        assert!(effects.is_empty());
        assert_eq!(form.submit_phase(), SubmitPhase::Editing);
        assert_eq!(form.status(), &StatusLine::VerifyFailed(err));

        let ui = form.ui();
        assert!(ui.submit_enabled);
        assert_eq!(ui.submit_label, "Sign In");
    }

    #[test]
    fn submit_stays_locked_while_verifying_despite_valid_fields() {
        let mut form = FormController::default();
        accept(&mut form, identity("dave@wustl.edu"));
        accept(&mut form, code("654321"));
        accept(&mut form, FormEvent::SubmitPressed);

        // Input events during the in-flight verify must not re-enable submit.
        accept(&mut form, identity("dave@wustl.edu"));
        assert!(!form.ui().submit_enabled);
    }

    #[test]
    fn flows_are_not_mutually_exclusive() {
        let mut form = FormController::default();
        accept(&mut form, identity("erin@wustl.edu"));
        accept(&mut form, code("987654"));
        accept(&mut form, FormEvent::SendPressed);

        // Submit proceeds while the send is still in flight.
        let effects = accept(&mut form, FormEvent::SubmitPressed);
        assert!(matches!(effects.as_slice(), [FormEffect::DispatchVerify { .. }]));
    }

    #[test]
    fn stray_completions_and_timers_are_fatal() {
        let mut form = FormController::default();

        let err = form
            .handle(FormEvent::SendCompleted { result: Ok(()) })
            .expect_err("no send in flight");
        assert!(err.is_fatal());

        let err = form
            .handle(FormEvent::VerifyCompleted { result: Ok(()) })
            .expect_err("no verify in flight");
        assert!(err.is_fatal());

        let err = form
            .handle(FormEvent::TimerFired { timer: Timer::CountdownTick })
            .expect_err("no countdown running");
        assert!(err.is_fatal());

        let err = form
            .handle(FormEvent::TimerFired { timer: Timer::RedirectDelay })
            .expect_err("no redirect pending");
        assert!(err.is_fatal());
    }

    #[test]
    fn redirect_timer_cannot_fire_twice() {
        let mut form = FormController::default();
        accept(&mut form, identity("dave@wustl.edu"));
        accept(&mut form, code("654321"));
        accept(&mut form, FormEvent::SubmitPressed);
        accept(&mut form, FormEvent::VerifyCompleted { result: Ok(()) });
        accept(&mut form, FormEvent::TimerFired { timer: Timer::RedirectDelay });

        let err = form
            .handle(FormEvent::TimerFired { timer: Timer::RedirectDelay })
            .expect_err("already navigated");
        assert!(err.is_fatal());
    }
}
