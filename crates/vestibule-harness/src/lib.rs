//! Deterministic simulation harness for the vestibule sign-in form.
//!
//! Virtual-clock driving of the real controller plus a brute-force reference
//! model for model-based testing. Operations are applied to both and their
//! observable states are compared.
//!
//! # Model-Based Testing
//!
//! ```text
//! proptest generates: Vec<Operation>
//!                          │
//!           ┌──────────────┼──────────────┐
//!           ▼              ▼              ▼
//!      ModelForm      FormWorld       Compare
//!      (ms-by-ms)     (real ctrl)     Results
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
pub mod model;
mod world;

pub use config::SimConfig;
pub use model::{ModelForm, ObservableState, Operation, OperationResult};
pub use world::FormWorld;
