//! Fuzz target for the [`FormController`] state machine
//!
//! Prevent inconsistent button states via invalid event sequences
//!
//! # Strategy
//!
//! - Event sequences: Arbitrary interleavings of input edits, presses,
//!   completions, and timer firings
//! - Stray deliveries: Completions with nothing in flight, timers that were
//!   never armed
//! - Flow interleaving: Send and submit racing each other
//!
//! # Invariants
//!
//! - NEVER panic on any event sequence
//! - A send in flight and a running countdown never overlap
//! - `Navigate` is emitted at most once
//! - Transient errors leave observable state unchanged
//! - The UI projection is total in every reachable state

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use vestibule_core::{
    BackendError, FormConfig, FormController, FormEffect, FormEvent, SendPhase, Timer,
};

#[derive(Debug, Clone, Arbitrary)]
enum FuzzEvent {
    Identity { value: String },
    Code { value: String },
    PressSend,
    PressSubmit,
    SendOk,
    SendFailed,
    VerifyOk,
    VerifyFailed,
    TickFired,
    RedirectFired,
}

impl FuzzEvent {
    fn into_event(self) -> FormEvent {
        match self {
            Self::Identity { value } => FormEvent::IdentityChanged { value },
            Self::Code { value } => FormEvent::CodeChanged { value },
            Self::PressSend => FormEvent::SendPressed,
            Self::PressSubmit => FormEvent::SubmitPressed,
            Self::SendOk => FormEvent::SendCompleted { result: Ok(()) },
            Self::SendFailed => FormEvent::SendCompleted {
                result: Err(BackendError::Unavailable { reason: "fuzzed".to_string() }),
            },
            Self::VerifyOk => FormEvent::VerifyCompleted { result: Ok(()) },
            Self::VerifyFailed => FormEvent::VerifyCompleted {
                result: Err(BackendError::Rejected { reason: "fuzzed".to_string() }),
            },
            Self::TickFired => FormEvent::TimerFired { timer: Timer::CountdownTick },
            Self::RedirectFired => FormEvent::TimerFired { timer: Timer::RedirectDelay },
        }
    }
}

fuzz_target!(|events: Vec<FuzzEvent>| {
    let mut form = FormController::new(FormConfig::default());
    let mut navigations = 0usize;

    for fuzz_event in events {
        let before = form.ui();
        match form.handle(fuzz_event.into_event()) {
            Ok(effects) => {
                for effect in effects {
                    if matches!(effect, FormEffect::Navigate { .. }) {
                        navigations += 1;
                    }
                }
            },
            Err(err) => {
                // Rejected events must not mutate observable state.
                if !err.is_fatal() {
                    assert_eq!(form.ui(), before);
                }
            },
        }

        assert!(navigations <= 1, "navigation must be emitted at most once");
        assert!(
            !(form.send_phase() == SendPhase::Sending && form.countdown().is_running()),
            "a send in flight and a running countdown must never overlap"
        );

        // The projection must be total in every reachable state.
        let _ = form.ui();
    }
});
