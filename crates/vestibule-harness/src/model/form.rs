//! Model form state machine.
//!
//! Brute-force reference implementation: time advances one millisecond per
//! step and every pending delay is a plain integer counter. No effect
//! queue, no tagged states - just the observable rules of the form.

use std::{collections::VecDeque, sync::OnceLock};

use regex::Regex;
use vestibule_core::{BackendError, navigation::redirect_target};

use super::operation::{Operation, OperationResult};
use crate::config::SimConfig;

/// Observable surface for oracle comparison.
///
/// This is the subset of form state that can be compared against the real
/// controller. The status line is deliberately excluded: when two flows
/// complete in the same instant its content depends on delivery order, which
/// the model does not define. Scenario tests pin the status wording instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservableState {
    /// Send-button label.
    pub send_label: String,
    /// Whether the send button accepts activation.
    pub send_enabled: bool,
    /// Submit-button label.
    pub submit_label: String,
    /// Whether the submit button accepts activation.
    pub submit_enabled: bool,
    /// Countdown line while the resend lockout runs.
    pub countdown_line: Option<String>,
    /// Navigation target once the redirect fired.
    pub navigated_to: Option<String>,
}

#[allow(clippy::expect_used)]
fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^[^\s@]+@wustl\.edu$").expect("pattern is valid"))
}

/// Model form state.
///
/// Tracks field values and in-flight delays as millisecond counters.
#[derive(Debug, Clone)]
pub struct ModelForm {
    config: SimConfig,
    identity: String,
    code: String,
    /// Milliseconds until an in-flight send completes.
    send_ms_left: Option<u32>,
    /// Seconds left on the resend lockout (0 = idle).
    cooldown_secs_left: u32,
    /// Milliseconds until the next lockout decrement.
    tick_ms_left: u32,
    /// Milliseconds until an in-flight verify completes.
    verify_ms_left: Option<u32>,
    /// Milliseconds until navigation after a successful verify.
    redirect_ms_left: Option<u32>,
    code_requested: bool,
    logged_in: bool,
    navigated_to: Option<String>,
    send_results: VecDeque<Result<(), BackendError>>,
    verify_results: VecDeque<Result<(), BackendError>>,
}

impl ModelForm {
    /// Create a model form with the given timing configuration.
    pub fn new(config: SimConfig) -> Self {
        let config = SimConfig {
            send_latency_ms: config.send_latency_ms.max(1),
            verify_latency_ms: config.verify_latency_ms.max(1),
            redirect_delay_ms: config.redirect_delay_ms.max(1),
            ..config
        };
        Self {
            config,
            identity: String::new(),
            code: String::new(),
            send_ms_left: None,
            cooldown_secs_left: 0,
            tick_ms_left: 0,
            verify_ms_left: None,
            redirect_ms_left: None,
            code_requested: false,
            logged_in: false,
            navigated_to: None,
            send_results: VecDeque::new(),
            verify_results: VecDeque::new(),
        }
    }

    /// Script the outcome of the next dispatched send.
    pub fn fail_next_send(&mut self, err: BackendError) {
        self.send_results.push_back(Err(err));
    }

    /// Script the outcome of the next dispatched verify.
    pub fn fail_next_verify(&mut self, err: BackendError) {
        self.verify_results.push_back(Err(err));
    }

    /// Apply an operation and return the result.
    pub fn apply(&mut self, op: &Operation) -> OperationResult {
        match op {
            Operation::SetIdentity { value } => {
                self.identity = value.clone();
                OperationResult::Applied
            },
            Operation::SetCode { value } => {
                self.code = value.clone();
                OperationResult::Applied
            },
            Operation::PressSend => self.press_send(),
            Operation::PressSubmit => self.press_submit(),
            Operation::AdvanceTime { millis } => {
                for _ in 0..*millis {
                    self.step_ms();
                }
                OperationResult::Applied
            },
        }
    }

    /// Extract the observable surface for comparison.
    pub fn observable_state(&self) -> ObservableState {
        let send_label = if self.send_ms_left.is_some() {
            "Sending…".to_string()
        } else if self.cooldown_secs_left > 0 {
            format!("Resend in {}s", self.cooldown_secs_left)
        } else if self.code_requested {
            "Resend Activation Code".to_string()
        } else {
            "Send Activation Code".to_string()
        };

        let submit_label = if self.verify_ms_left.is_some() || self.logged_in {
            "Verifying…".to_string()
        } else {
            "Sign In".to_string()
        };

        ObservableState {
            send_label,
            send_enabled: self.send_enabled(),
            submit_label,
            submit_enabled: self.submit_enabled(),
            countdown_line: (self.cooldown_secs_left > 0)
                .then(|| format!("Resend available in {}s…", self.cooldown_secs_left)),
            navigated_to: self.navigated_to.clone(),
        }
    }

    fn identity_valid(&self) -> bool {
        let trimmed = self.identity.trim();
        if trimmed.contains('@') {
            email_regex().is_match(trimmed)
        } else {
            trimmed.chars().count() >= 3
        }
    }

    fn code_valid(&self) -> bool {
        self.code.trim().chars().count() >= 6
    }

    fn send_enabled(&self) -> bool {
        self.send_ms_left.is_none() && self.cooldown_secs_left == 0 && self.identity_valid()
    }

    fn submit_enabled(&self) -> bool {
        self.verify_ms_left.is_none()
            && !self.logged_in
            && self.identity_valid()
            && self.code_valid()
    }

    fn press_send(&mut self) -> OperationResult {
        if !self.send_enabled() {
            return OperationResult::Rejected;
        }
        self.send_ms_left = Some(self.config.send_latency_ms);
        OperationResult::Applied
    }

    fn press_submit(&mut self) -> OperationResult {
        if self.verify_ms_left.is_some() || self.logged_in {
            return OperationResult::Rejected;
        }
        if self.identity_valid() && self.code_valid() {
            self.verify_ms_left = Some(self.config.verify_latency_ms);
        }
        // An invalid submit only populates inline errors - still applied.
        OperationResult::Applied
    }

    /// Advance one millisecond.
    ///
    /// Counters armed within this step start counting on the NEXT step, so
    /// each block below runs before any block that can arm it.
    fn step_ms(&mut self) {
        // Redirect delay (armed by a completed verify).
        if let Some(ms) = self.redirect_ms_left.as_mut() {
            *ms -= 1;
            if *ms == 0 {
                self.redirect_ms_left = None;
                self.navigated_to =
                    Some(redirect_target(&self.config.destination, &self.identity));
            }
        }

        // Resend countdown (armed by a completed send).
        if self.cooldown_secs_left > 0 {
            self.tick_ms_left -= 1;
            if self.tick_ms_left == 0 {
                self.cooldown_secs_left -= 1;
                if self.cooldown_secs_left > 0 {
                    self.tick_ms_left = 1000;
                }
            }
        }

        // In-flight send.
        if let Some(ms) = self.send_ms_left.as_mut() {
            *ms -= 1;
            if *ms == 0 {
                self.send_ms_left = None;
                if self.send_results.pop_front().unwrap_or(Ok(())).is_ok() {
                    self.code_requested = true;
                    self.cooldown_secs_left = self.config.cooldown_secs;
                    if self.cooldown_secs_left > 0 {
                        self.tick_ms_left = 1000;
                    }
                }
            }
        }

        // In-flight verify.
        if let Some(ms) = self.verify_ms_left.as_mut() {
            *ms -= 1;
            if *ms == 0 {
                self.verify_ms_left = None;
                if self.verify_results.pop_front().unwrap_or(Ok(())).is_ok() {
                    self.logged_in = true;
                    self.redirect_ms_left = Some(self.config.redirect_delay_ms);
                }
            }
        }
    }
}
