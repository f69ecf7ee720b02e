//! Shared timing configuration for the model and the world.

use std::time::Duration;

use vestibule_core::FormConfig;

/// Timing knobs shared by [`ModelForm`](crate::ModelForm) and
/// [`FormWorld`](crate::FormWorld).
///
/// Defaults mirror the production values. Latencies and the redirect delay
/// are clamped to at least one millisecond when a simulation is built, so
/// every asynchronous step takes observable time.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Resend cooldown in whole seconds.
    pub cooldown_secs: u32,
    /// Simulated send-code latency in milliseconds.
    pub send_latency_ms: u32,
    /// Simulated verification latency in milliseconds.
    pub verify_latency_ms: u32,
    /// Delay between login success and navigation, in milliseconds.
    pub redirect_delay_ms: u32,
    /// Navigation destination path.
    pub destination: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            cooldown_secs: 60,
            send_latency_ms: 1000,
            verify_latency_ms: 600,
            redirect_delay_ms: 600,
            destination: "/dashboard".to_string(),
        }
    }
}

impl SimConfig {
    /// Controller configuration equivalent of these knobs.
    pub fn form_config(&self) -> FormConfig {
        FormConfig {
            cooldown_secs: self.cooldown_secs,
            redirect_delay: Duration::from_millis(u64::from(self.redirect_delay_ms.max(1))),
            destination: self.destination.clone(),
        }
    }
}
