//! Motor relay pair (one per channel).
//!
//! Two relays wired as an H-bridge: output A energized drives the cover
//! open, output B energized drives it closed, both off brakes the motor.
//! Both on would short the supply, so every switch is break-before-make:
//! the opposite relay is released before the requested one is pulled in.
//!
//! ## Dual-target design
//!
//! Generic over `embedded_hal` output pins; on ESP-IDF these are
//! [`GpioOutput`](super::hw_init::GpioOutput), in tests any fake pin.

use embedded_hal::digital::OutputPin;

use crate::fsm::states::Drive;

pub struct RelayPair<P> {
    a: P,
    b: P,
    active_low: bool,
    drive: Drive,
}

impl<P: OutputPin> RelayPair<P> {
    pub fn new(a: P, b: P, active_low: bool) -> Self {
        Self {
            a,
            b,
            active_low,
            drive: Drive::Off,
        }
    }

    /// Output A on, B off.
    pub fn energize_a(&mut self) -> Result<(), P::Error> {
        Self::write(&mut self.b, false, self.active_low)?;
        Self::write(&mut self.a, true, self.active_low)?;
        self.drive = Drive::OutputA;
        Ok(())
    }

    /// Output B on, A off.
    pub fn energize_b(&mut self) -> Result<(), P::Error> {
        Self::write(&mut self.a, false, self.active_low)?;
        Self::write(&mut self.b, true, self.active_low)?;
        self.drive = Drive::OutputB;
        Ok(())
    }

    pub fn deenergize_both(&mut self) -> Result<(), P::Error> {
        // Release both even if the first write fails.
        let a = Self::write(&mut self.a, false, self.active_low);
        let b = Self::write(&mut self.b, false, self.active_low);
        self.drive = Drive::Off;
        a.and(b)
    }

    /// Last successfully commanded drive.
    pub fn drive(&self) -> Drive {
        self.drive
    }

    fn write(pin: &mut P, energized: bool, active_low: bool) -> Result<(), P::Error> {
        if energized != active_low {
            pin.set_high()
        } else {
            pin.set_low()
        }
    }
}
