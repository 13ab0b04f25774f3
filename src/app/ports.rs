//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControllerService (domain)
//! ```
//!
//! Driven adapters (pins, relays, lamps, event sinks) implement these
//! traits.  The [`ControllerService`](super::service::ControllerService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use crate::error::Result;
use crate::fsm::Channel;
use crate::sensors::RawInputs;

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per cycle.
pub trait InputPort {
    /// Sample every button, limit switch and jumper.
    fn read_inputs(&mut self) -> Result<RawInputs>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port.  Nothing is reported back; write failures are the
/// adapter's to log.
pub trait ActuatorPort {
    /// Output A on, output B off (opening).
    fn energize_output_a(&mut self, channel: Channel);

    /// Output A off, output B on (closing).
    fn energize_output_b(&mut self, channel: Channel);

    /// Both outputs off.
    fn deenergize_both(&mut self, channel: Channel);

    /// Drive the channel's signal lamp.
    fn set_indicator(&mut self, channel: Channel, on: bool);

    /// Kill every relay and lamp (safe shutdown).
    fn all_off(&mut self) {
        for channel in Channel::ALL {
            self.deenergize_both(channel);
            self.set_indicator(channel, false);
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
