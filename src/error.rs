//! Unified error types for the DualCover firmware.
//!
//! The cover state machine itself is total and never fails. Errors only
//! appear at the edges: pin I/O in the hardware adapter, boot-time
//! peripheral setup, and configuration validation. All variants are `Copy`
//! so they can be logged and passed around without allocation.

use core::fmt;

use crate::fsm::Channel;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A raw input (button, limit switch, jumper) could not be sampled.
    Input(InputError),
    /// A relay or lamp output could not be driven.
    Output(OutputError),
    /// A safety interlock tripped.
    Safety(SafetyFault),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(e) => write!(f, "input: {e}"),
            Self::Output(e) => write!(f, "output: {e}"),
            Self::Safety(e) => write!(f, "safety: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Input errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// One of the three shared push buttons.
    Button,
    /// A limit switch of the given channel.
    LimitSwitch(Channel),
    /// A configuration jumper.
    Jumper,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Button => write!(f, "button read failed"),
            Self::LimitSwitch(ch) => write!(f, "limit switch read failed on channel {}", ch.index()),
            Self::Jumper => write!(f, "jumper read failed"),
        }
    }
}

impl From<InputError> for Error {
    fn from(e: InputError) -> Self {
        Self::Input(e)
    }
}

// ---------------------------------------------------------------------------
// Output errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputError {
    Relay(Channel),
    Indicator(Channel),
    Heartbeat,
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relay(ch) => write!(f, "relay write failed on channel {}", ch.index()),
            Self::Indicator(ch) => write!(f, "indicator write failed on channel {}", ch.index()),
            Self::Heartbeat => write!(f, "heartbeat LED write failed"),
        }
    }
}

impl From<OutputError> for Error {
    fn from(e: OutputError) -> Self {
        Self::Output(e)
    }
}

// ---------------------------------------------------------------------------
// Safety faults
// ---------------------------------------------------------------------------

/// Safety faults are tracked in a bitfield by the safety supervisor so that
/// both channels can be in fault at once and clear independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SafetyFault {
    /// Both limit switches of channel A report active.
    LimitConflictA = 0b0000_0001,
    /// Both limit switches of channel B report active.
    LimitConflictB = 0b0000_0010,
}

impl SafetyFault {
    /// Return the bitmask for this fault.
    pub const fn mask(self) -> u8 {
        self as u8
    }

    /// The limit conflict fault belonging to `channel`.
    pub const fn limit_conflict(channel: Channel) -> Self {
        match channel {
            Channel::A => Self::LimitConflictA,
            Channel::B => Self::LimitConflictB,
        }
    }
}

impl fmt::Display for SafetyFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LimitConflictA => write!(f, "both limit switches active on channel 0"),
            Self::LimitConflictB => write!(f, "both limit switches active on channel 1"),
        }
    }
}

impl From<SafetyFault> for Error {
    fn from(e: SafetyFault) -> Self {
        Self::Safety(e)
    }
}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
