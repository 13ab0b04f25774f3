//! Input subsystem: limit switches, jumpers, and the aggregating [`InputHub`].
//!
//! The hub owns every input pin and samples all of them once per poll
//! cycle into a [`RawInputs`] snapshot.  Interpretation (debouncing,
//! polarity, jumper meaning) happens downstream on the snapshot so that a
//! single cycle always sees one consistent set of levels.

pub mod jumpers;
pub mod limit_switch;

use embedded_hal::digital::InputPin;
use log::debug;

use crate::drivers::button::ButtonLevels;
use crate::error::{InputError, Result};
use crate::fsm::Channel;
use jumpers::JumperLevels;
use limit_switch::LimitLevels;

/// Every raw level sampled in one cycle (`true` = HIGH).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawInputs {
    pub buttons: ButtonLevels,
    pub limits: [LimitLevels; Channel::COUNT],
    pub jumpers: JumperLevels,
}

/// Input pins, grouped by function.
pub struct InputPins<P> {
    pub open_button: P,
    pub close_button: P,
    pub stop_button: P,
    /// (top, bottom) indexed by channel.
    pub limits: [(P, P); Channel::COUNT],
    /// J1..J4.
    pub jumpers: [P; 4],
}

pub struct InputHub<P> {
    pins: InputPins<P>,
}

impl<P: InputPin> InputHub<P> {
    pub fn new(pins: InputPins<P>) -> Self {
        Self { pins }
    }

    /// Sample every input.  A failing pin aborts the snapshot: a cycle must
    /// never mix fresh and stale levels.
    pub fn read_all(&mut self) -> Result<RawInputs> {
        let p = &mut self.pins;

        let buttons = ButtonLevels {
            open: level(&mut p.open_button, InputError::Button)?,
            close: level(&mut p.close_button, InputError::Button)?,
            stop: level(&mut p.stop_button, InputError::Button)?,
        };

        let mut limits = [LimitLevels::default(); Channel::COUNT];
        for channel in Channel::ALL {
            let (top, bottom) = &mut p.limits[channel.index()];
            let err = InputError::LimitSwitch(channel);
            limits[channel.index()] = LimitLevels {
                top: level(top, err)?,
                bottom: level(bottom, err)?,
            };
        }

        let [j1, j2, j3, j4] = &mut p.jumpers;
        let jumpers = JumperLevels {
            limit_logic: [level(j1, InputError::Jumper)?, level(j2, InputError::Jumper)?],
            open_logic: level(j3, InputError::Jumper)?,
            close_logic: level(j4, InputError::Jumper)?,
        };

        Ok(RawInputs {
            buttons,
            limits,
            jumpers,
        })
    }
}

fn level<P: InputPin>(pin: &mut P, on_error: InputError) -> Result<bool> {
    pin.is_high().map_err(|e| {
        debug!("input pin error: {:?}", e);
        on_error.into()
    })
}
