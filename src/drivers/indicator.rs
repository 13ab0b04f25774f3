//! Signal lamp driver.
//!
//! One high-active lamp per channel, plus the on-board heartbeat LED.
//! The driver only remembers the last level written; what the lamp should
//! show is decided by the state table and the blink phase.

use embedded_hal::digital::OutputPin;

pub struct Lamp<P> {
    pin: P,
    lit: bool,
}

impl<P: OutputPin> Lamp<P> {
    pub fn new(pin: P) -> Self {
        Self { pin, lit: false }
    }

    pub fn set(&mut self, on: bool) -> Result<(), P::Error> {
        if on {
            self.pin.set_high()?;
        } else {
            self.pin.set_low()?;
        }
        self.lit = on;
        Ok(())
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }
}
