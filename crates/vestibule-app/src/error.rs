//! Driver error types.

use std::fmt;

use vestibule_core::ControllerError;

/// Errors that can occur while driving the form.
#[derive(Debug)]
pub enum AppError {
    /// The controller rejected an event with a fatal error.
    Controller(ControllerError),

    /// Terminal I/O failed.
    Io(std::io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Controller(err) => write!(f, "controller error: {err}"),
            Self::Io(err) => write!(f, "terminal error: {err}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Controller(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<ControllerError> for AppError {
    fn from(err: ControllerError) -> Self {
        Self::Controller(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
