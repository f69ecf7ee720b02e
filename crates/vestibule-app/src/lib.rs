//! Production driver for the vestibule sign-in form.
//!
//! This crate provides the runtime wiring around the pure controller:
//!
//! ```text
//! vestibule-app
//!   ├─ SystemEnv      (production Environment impl)
//!   ├─ MockBackend    (fixed-latency simulated service)
//!   ├─ FormDriver     (effect executor on tokio)
//!   └─ render         (terminal transcription of UiState)
//! ```
//!
//! The binary reads field edits and button presses from stdin, feeds them
//! through the driver, and re-renders after every event until the form
//! navigates away.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod driver;
mod error;
mod mock_backend;
mod render;
mod system_env;

pub use driver::FormDriver;
pub use error::AppError;
pub use mock_backend::{DEFAULT_SEND_LATENCY, DEFAULT_VERIFY_LATENCY, MockBackend};
pub use render::render;
pub use system_env::SystemEnv;
