//! Resend-countdown state machine.
//!
//! Once an activation code is sent, resending is locked out for a fixed
//! number of seconds. The countdown is a tagged value advanced by explicit
//! tick events; it has no timer of its own. While it runs it is the sole
//! authority locking the resend action, regardless of identity validity.
//!
//! There is no pause or external cancel: once started, the countdown always
//! runs to completion.

/// Resend lockout state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Countdown {
    /// No lockout active; resend availability follows identity validity.
    #[default]
    Idle,
    /// Lockout active with this many whole seconds remaining.
    Running {
        /// Seconds until resend unlocks. Always >= 1 while in this state.
        remaining: u32,
    },
}

/// Outcome of advancing a running countdown by one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Still running with the given seconds remaining.
    Running {
        /// Seconds remaining after the tick.
        remaining: u32,
    },
    /// Reached zero; the lockout is over.
    Expired,
}

impl Countdown {
    /// Start a lockout of `seconds`. Zero seconds means no lockout.
    pub fn start(seconds: u32) -> Self {
        if seconds == 0 { Self::Idle } else { Self::Running { remaining: seconds } }
    }

    /// Whether a lockout is active.
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }

    /// Seconds remaining, or `None` when idle.
    pub fn remaining(&self) -> Option<u32> {
        match self {
            Self::Idle => None,
            Self::Running { remaining } => Some(*remaining),
        }
    }

    /// Advance by one second.
    ///
    /// Returns `None` when no lockout is active (a tick arriving then is a
    /// driver bug and is surfaced by the controller).
    pub fn tick(&mut self) -> Option<Tick> {
        match self {
            Self::Idle => None,
            Self::Running { remaining } => {
                *remaining -= 1;
                if *remaining == 0 {
                    *self = Self::Idle;
                    Some(Tick::Expired)
                } else {
                    Some(Tick::Running { remaining: *remaining })
                }
            },
        }
    }
}
