//! Hardware adapter: bridges real pins to domain port traits.
//!
//! Owns the [`InputHub`], both channels' [`RelayPair`]s and signal
//! [`Lamp`]s, exposing them through [`InputPort`] and [`ActuatorPort`].
//! This is the only module in the system that touches pins.  Generic over
//! the `embedded_hal` pin types: on ESP-IDF these are the `hw_init` GPIO
//! wrappers, in tests any fake pin.
//!
//! Output write failures are logged here and otherwise dropped; the
//! service rewrites every output on the next cycle.

use embedded_hal::digital::{InputPin, OutputPin};
use log::warn;

use crate::app::ports::{ActuatorPort, InputPort};
use crate::drivers::indicator::Lamp;
use crate::drivers::relay::RelayPair;
use crate::error::{OutputError, Result};
use crate::fsm::Channel;
use crate::sensors::{InputHub, RawInputs};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<I, O> {
    inputs: InputHub<I>,
    relays: [RelayPair<O>; Channel::COUNT],
    lamps: [Lamp<O>; Channel::COUNT],
}

impl<I: InputPin, O: OutputPin> HardwareAdapter<I, O> {
    pub fn new(
        inputs: InputHub<I>,
        relays: [RelayPair<O>; Channel::COUNT],
        lamps: [Lamp<O>; Channel::COUNT],
    ) -> Self {
        Self {
            inputs,
            relays,
            lamps,
        }
    }

    pub fn relays(&self, channel: Channel) -> &RelayPair<O> {
        &self.relays[channel.index()]
    }

    pub fn lamp(&self, channel: Channel) -> &Lamp<O> {
        &self.lamps[channel.index()]
    }

    fn log_write<E: core::fmt::Debug>(result: core::result::Result<(), E>, what: OutputError) {
        if let Err(e) = result {
            warn!("{what}: {:?}", e);
        }
    }
}

// ── InputPort implementation ──────────────────────────────────

impl<I: InputPin, O: OutputPin> InputPort for HardwareAdapter<I, O> {
    fn read_inputs(&mut self) -> Result<RawInputs> {
        self.inputs.read_all()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<I: InputPin, O: OutputPin> ActuatorPort for HardwareAdapter<I, O> {
    fn energize_output_a(&mut self, channel: Channel) {
        let result = self.relays[channel.index()].energize_a();
        Self::log_write(result, OutputError::Relay(channel));
    }

    fn energize_output_b(&mut self, channel: Channel) {
        let result = self.relays[channel.index()].energize_b();
        Self::log_write(result, OutputError::Relay(channel));
    }

    fn deenergize_both(&mut self, channel: Channel) {
        let result = self.relays[channel.index()].deenergize_both();
        Self::log_write(result, OutputError::Relay(channel));
    }

    fn set_indicator(&mut self, channel: Channel, on: bool) {
        let result = self.lamps[channel.index()].set(on);
        Self::log_write(result, OutputError::Indicator(channel));
    }
}
