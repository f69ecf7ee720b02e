//! Form driver: executes controller effects on the tokio runtime.
//!
//! The driver feeds events into the controller and turns the returned
//! effects into real work: timers become spawned sleeps, dispatches become
//! backend calls, and both push their completion back into the driver's
//! event channel. Navigation is recorded for the caller to act on.
//!
//! Transient controller errors (a press landing on a locked action) are
//! logged and dropped; fatal ones propagate, because they mean the driver
//! delivered an event the controller never asked for.

use std::sync::Arc;

use tokio::sync::mpsc;
use vestibule_core::{
    AuthBackend, Environment, FormConfig, FormController, FormEffect, FormEvent, UiState,
};

use crate::error::AppError;

/// Drives a [`FormController`] on the tokio runtime.
pub struct FormDriver<E: Environment, B: AuthBackend + 'static> {
    controller: FormController,
    env: E,
    backend: Arc<B>,
    events_tx: mpsc::UnboundedSender<FormEvent>,
    events_rx: mpsc::UnboundedReceiver<FormEvent>,
    navigation: Option<String>,
}

impl<E: Environment, B: AuthBackend + 'static> FormDriver<E, B> {
    /// Create a driver around a fresh controller.
    pub fn new(config: FormConfig, env: E, backend: Arc<B>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            controller: FormController::new(config),
            env,
            backend,
            events_tx,
            events_rx,
            navigation: None,
        }
    }

    /// The controller being driven.
    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    /// Project the current UI surface.
    pub fn ui(&self) -> UiState {
        self.controller.ui()
    }

    /// Navigation target, once the redirect has fired.
    pub fn navigation(&self) -> Option<&str> {
        self.navigation.as_deref()
    }

    /// Feed one event through the controller and execute its effects.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Controller` when the controller reports a fatal
    /// error. Transient rejections are logged and swallowed.
    pub fn process(&mut self, event: FormEvent) -> Result<(), AppError> {
        match self.controller.handle(event) {
            Ok(effects) => {
                for effect in effects {
                    self.execute(effect);
                }
                Ok(())
            },
            Err(err) if !err.is_fatal() => {
                tracing::debug!(error = %err, "ignoring press on locked action");
                Ok(())
            },
            Err(err) => Err(AppError::Controller(err)),
        }
    }

    /// Wait for the next internally generated event (timer firing or backend
    /// completion).
    ///
    /// Pends until one is available; the driver holds a sender, so this never
    /// returns `None` in practice.
    pub async fn next_event(&mut self) -> Option<FormEvent> {
        self.events_rx.recv().await
    }

    fn execute(&mut self, effect: FormEffect) {
        match effect {
            FormEffect::StartTimer { timer, after } => {
                let env = self.env.clone();
                let tx = self.events_tx.clone();
                tokio::spawn(async move {
                    env.sleep(after).await;
                    let _ = tx.send(FormEvent::TimerFired { timer });
                });
            },
            FormEffect::DispatchSendCode { identity } => {
                let backend = Arc::clone(&self.backend);
                let tx = self.events_tx.clone();
                tokio::spawn(async move {
                    let result = backend.send_code(&identity).await;
                    let _ = tx.send(FormEvent::SendCompleted { result });
                });
            },
            FormEffect::DispatchVerify { identity, code } => {
                let backend = Arc::clone(&self.backend);
                let tx = self.events_tx.clone();
                tokio::spawn(async move {
                    let result = backend.verify(&identity, &code).await;
                    let _ = tx.send(FormEvent::VerifyCompleted { result });
                });
            },
            FormEffect::Navigate { target } => {
                tracing::info!(target = %target, "navigation requested");
                self.navigation = Some(target);
            },
        }
    }
}
