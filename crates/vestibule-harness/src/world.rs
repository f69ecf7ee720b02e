//! Real-controller world on a virtual clock.
//!
//! `FormWorld` owns a real [`FormController`] and plays the driver's role
//! deterministically: effects become pending deliveries with a due time, and
//! advancing the clock fires them in chronological order (FIFO within the
//! same instant). No tokio, no real sleeping - the world IS the scheduler.

use std::collections::VecDeque;

use vestibule_core::{BackendError, FormController, FormEffect, FormEvent};

use crate::{
    config::SimConfig,
    model::{ObservableState, Operation, OperationResult},
};

/// A scheduled event delivery.
#[derive(Debug, Clone)]
struct Pending {
    due_ms: u64,
    seq: u64,
    event: FormEvent,
}

/// Drives the real controller on a virtual clock.
pub struct FormWorld {
    config: SimConfig,
    controller: FormController,
    now_ms: u64,
    seq: u64,
    pending: Vec<Pending>,
    navigated: Option<String>,
    send_results: VecDeque<Result<(), BackendError>>,
    verify_results: VecDeque<Result<(), BackendError>>,
}

impl FormWorld {
    /// Create a world with the given timing configuration.
    pub fn new(config: SimConfig) -> Self {
        let controller = FormController::new(config.form_config());
        let config = SimConfig {
            send_latency_ms: config.send_latency_ms.max(1),
            verify_latency_ms: config.verify_latency_ms.max(1),
            ..config
        };
        Self {
            config,
            controller,
            now_ms: 0,
            seq: 0,
            pending: Vec::new(),
            navigated: None,
            send_results: VecDeque::new(),
            verify_results: VecDeque::new(),
        }
    }

    /// The controller being driven (for status-line assertions).
    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
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
                self.deliver(FormEvent::IdentityChanged { value: value.clone() })
            },
            Operation::SetCode { value } => {
                self.deliver(FormEvent::CodeChanged { value: value.clone() })
            },
            Operation::PressSend => self.deliver(FormEvent::SendPressed),
            Operation::PressSubmit => self.deliver(FormEvent::SubmitPressed),
            Operation::AdvanceTime { millis } => self.advance(u64::from(*millis)),
        }
    }

    /// Extract the observable surface for comparison.
    pub fn observable_state(&self) -> ObservableState {
        let ui = self.controller.ui();
        ObservableState {
            send_label: ui.send_label,
            send_enabled: ui.send_enabled,
            submit_label: ui.submit_label,
            submit_enabled: ui.submit_enabled,
            countdown_line: ui.countdown,
            navigated_to: self.navigated.clone(),
        }
    }

    fn deliver(&mut self, event: FormEvent) -> OperationResult {
        match self.controller.handle(event) {
            Ok(effects) => {
                for effect in effects {
                    self.execute(effect);
                }
                OperationResult::Applied
            },
            Err(err) if !err.is_fatal() => OperationResult::Rejected,
            Err(err) => OperationResult::Faulted(err),
        }
    }

    fn execute(&mut self, effect: FormEffect) {
        match effect {
            FormEffect::StartTimer { timer, after } => {
                let after_ms = u64::try_from(after.as_millis()).unwrap_or(u64::MAX);
                self.schedule(self.now_ms + after_ms, FormEvent::TimerFired { timer });
            },
            FormEffect::DispatchSendCode { .. } => {
                let result = self.send_results.pop_front().unwrap_or(Ok(()));
                let due = self.now_ms + u64::from(self.config.send_latency_ms);
                self.schedule(due, FormEvent::SendCompleted { result });
            },
            FormEffect::DispatchVerify { .. } => {
                let result = self.verify_results.pop_front().unwrap_or(Ok(()));
                let due = self.now_ms + u64::from(self.config.verify_latency_ms);
                self.schedule(due, FormEvent::VerifyCompleted { result });
            },
            FormEffect::Navigate { target } => {
                self.navigated = Some(target);
            },
        }
    }

    fn schedule(&mut self, due_ms: u64, event: FormEvent) {
        let seq = self.seq;
        self.seq += 1;
        self.pending.push(Pending { due_ms, seq, event });
    }

    /// Fire everything due within the next `millis` milliseconds, in order.
    fn advance(&mut self, millis: u64) -> OperationResult {
        let target = self.now_ms + millis;
        loop {
            let next = self
                .pending
                .iter()
                .enumerate()
                .filter(|(_, p)| p.due_ms <= target)
                .min_by_key(|(_, p)| (p.due_ms, p.seq))
                .map(|(index, _)| index);
            let Some(index) = next else { break };

            let pending = self.pending.remove(index);
            self.now_ms = pending.due_ms;
            match self.deliver(pending.event) {
                OperationResult::Applied => {},
                // Scheduled deliveries are never transient rejections; a
                // fault here means the controller and world disagree.
                other => return other,
            }
        }
        self.now_ms = target;
        OperationResult::Applied
    }
}
