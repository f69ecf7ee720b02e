//! Reference model for model-based testing.
//!
//! The model is a simplified implementation that captures WHAT the form
//! does without sharing the real controller's structure: it advances one
//! millisecond at a time with plain integer counters and decides email
//! validity with a regex instead of the hand-rolled parser. It serves as the
//! oracle against which the real controller is verified.
//!
//! # Design Principles
//!
//! - Simplicity: the model should be obviously correct
//! - Independence: no effect queue, no state machine types, no shared
//!   validation code
//! - Deterministic: same operations produce the same observable state

mod form;
pub mod operation;

pub use form::{ModelForm, ObservableState};
pub use operation::{Operation, OperationResult};
