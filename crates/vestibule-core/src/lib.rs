//! Sign-in form controller.
//!
//! Action-based state machine for an activation sign-in form: identity and
//! code validation, a resend countdown, and the two asynchronous flows
//! (send activation code, verify and redirect).
//!
//! # Architecture
//!
//! The controller is a pure state machine that:
//! - Receives events from the caller (input changes, presses, completions,
//!   timer firings)
//! - Produces effects for the caller to execute (dispatch backend calls, arm
//!   timers, navigate)
//! - Projects the entire visible surface in a single step ([`UiState`])
//!
//! Time and backend I/O stay behind the [`Environment`] and [`AuthBackend`]
//! traits, so the whole machine runs deterministically under test.
//!
//! # Components
//!
//! - [`FormController`]: the state machine
//! - [`FormEvent`] / [`FormEffect`]: events in, effects out
//! - [`Countdown`]: resend lockout advanced by explicit ticks
//! - [`UiState`]: pure projection of the visible surface
//! - [`validation`]: identity/code rules and username derivation

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod backend;
mod controller;
mod countdown;
pub mod env;
mod error;
mod event;
pub mod navigation;
mod ui;
pub mod validation;

pub use backend::{AuthBackend, BackendError};
pub use controller::{
    FormConfig, FormController, SendPhase, StatusLine, SubmitPhase, TICK_INTERVAL,
};
pub use countdown::{Countdown, Tick};
pub use env::Environment;
pub use error::{ControllerError, Flow};
pub use event::{FormEffect, FormEvent, Timer};
pub use ui::{
    LABEL_RESEND, LABEL_SEND, LABEL_SENDING, LABEL_SIGN_IN, LABEL_VERIFYING, MSG_CODE_INVALID,
    MSG_CODE_SENT, MSG_IDENTITY_INVALID, MSG_LOGIN_OK, UiState,
};
