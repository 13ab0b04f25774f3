//! System configuration parameters
//!
//! Build-time tunables for the controller. Per-channel limit-switch
//! polarity and the hold-to-move button mode are NOT here: they come from
//! the jumpers and are re-read every poll cycle (see
//! [`sensors::jumpers`](crate::sensors::jumpers)).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    // --- Timing ---
    /// Delay between poll cycles (milliseconds)
    pub poll_interval_ms: u32,
    /// A button level must be stable this long before an edge is accepted
    pub debounce_ms: u32,
    /// Indicator blink phase toggles once per this period (milliseconds)
    pub blink_half_period_ms: u32,

    // --- Electrical ---
    /// Buttons pull their input low when pressed (pull-up wiring)
    pub buttons_active_low: bool,
    /// Relay module energizes on a low output level
    pub relays_active_low: bool,

    // --- Supervision ---
    /// Task watchdog timeout (milliseconds)
    pub watchdog_timeout_ms: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            // Timing
            poll_interval_ms: 1,
            debounce_ms: 5,
            blink_half_period_ms: 333, // ~3 Hz

            // Electrical
            buttons_active_low: true,
            relays_active_low: false,

            // Supervision
            watchdog_timeout_ms: 5000,
        }
    }
}

impl ControllerConfig {
    /// Reject values that would make the poll loop or the blink timer
    /// misbehave.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(Error::Config("poll_interval_ms must be non-zero"));
        }
        if self.blink_half_period_ms == 0 {
            return Err(Error::Config("blink_half_period_ms must be non-zero"));
        }
        if self.debounce_ms >= self.blink_half_period_ms {
            return Err(Error::Config(
                "debounce_ms must be shorter than blink_half_period_ms",
            ));
        }
        if self.watchdog_timeout_ms <= self.poll_interval_ms {
            return Err(Error::Config(
                "watchdog_timeout_ms must exceed poll_interval_ms",
            ));
        }
        Ok(())
    }
}
