//! Outbound application events.
//!
//! The [`ControllerService`](super::service::ControllerService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on
//! the other side decide what to do with them; the firmware logs them to
//! the serial console.

use crate::error::{Error, SafetyFault};
use crate::fsm::{Channel, CoverState};
use crate::sensors::jumpers::JumperSettings;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The service has started; every channel begins in `initial`.
    Started { initial: CoverState },

    /// A channel's state differs from the start of the cycle.  Emitted at
    /// most once per channel per cycle.
    StateChanged {
        channel: Channel,
        from: CoverState,
        to: CoverState,
    },

    /// A limit-switch conflict was raised on one channel.
    FaultDetected(SafetyFault),

    /// A previously raised conflict is gone.
    FaultCleared(SafetyFault),

    /// The decoded jumper configuration changed (or was read for the
    /// first time).
    JumpersChanged(JumperSettings),

    /// Inputs could not be sampled; outputs were forced off this cycle.
    InputFailure(Error),
}
