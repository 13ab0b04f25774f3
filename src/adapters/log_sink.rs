//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the ESP-IDF
//! logger (which goes to UART / USB-CDC in production).  State changes
//! produce the diagnostic line `Channel <n>: <STATE>`, once per
//! transition.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::fsm::{Channel, CoverState};

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

/// The diagnostic line for a channel entering `state`.
pub fn state_line(channel: Channel, state: CoverState) -> String {
    format!("Channel {}: {}", channel.index(), state.name())
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { initial } => {
                for channel in Channel::ALL {
                    info!("{}", state_line(channel, *initial));
                }
            }
            AppEvent::StateChanged { channel, to, .. } => {
                info!("{}", state_line(*channel, *to));
            }
            AppEvent::FaultDetected(fault) => {
                warn!("FAULT | {fault}");
            }
            AppEvent::FaultCleared(fault) => {
                info!("FAULT | cleared: {fault}");
            }
            AppEvent::JumpersChanged(settings) => {
                info!(
                    "JUMPERS | A={:?} B={:?} hold_open={} hold_close={}",
                    settings.channel(Channel::A).polarity(),
                    settings.channel(Channel::B).polarity(),
                    settings.mode.hold_to_open,
                    settings.mode.hold_to_close,
                );
            }
            AppEvent::InputFailure(e) => {
                warn!("INPUT | {e}");
            }
        }
    }
}
