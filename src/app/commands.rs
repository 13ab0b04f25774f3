//! Inbound commands to the controller service.
//!
//! Debounced [`ButtonEvent`]s come out of the
//! [`ButtonPanel`](crate::drivers::button::ButtonPanel); the service turns
//! each into at most one [`CoverCommand`] and hands it to BOTH channels'
//! state machines.

use crate::drivers::button::{BUTTON_COUNT, Edge};
use crate::sensors::jumpers::ButtonMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ButtonId {
    Open = 0,
    Close = 1,
    Stop = 2,
}

impl ButtonId {
    pub const ALL: [ButtonId; BUTTON_COUNT] = [ButtonId::Open, ButtonId::Close, ButtonId::Stop];

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// An accepted (debounced) button transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    Pressed(ButtonId),
    Released(ButtonId),
}

impl ButtonEvent {
    pub fn from_edge(id: ButtonId, edge: Edge) -> Self {
        match edge {
            Edge::Pressed => Self::Pressed(id),
            Edge::Released => Self::Released(id),
        }
    }

    /// What this event asks the covers to do under the current button mode.
    ///
    /// Releasing Open or Close only stops when that direction is in
    /// hold-to-move mode; releasing Stop does nothing.
    pub fn command(self, mode: ButtonMode) -> Option<CoverCommand> {
        match self {
            Self::Pressed(ButtonId::Open) => Some(CoverCommand::Open),
            Self::Pressed(ButtonId::Close) => Some(CoverCommand::Close),
            Self::Pressed(ButtonId::Stop) => Some(CoverCommand::Stop),
            Self::Released(ButtonId::Open) if mode.hold_to_open => Some(CoverCommand::Stop),
            Self::Released(ButtonId::Close) if mode.hold_to_close => Some(CoverCommand::Stop),
            Self::Released(_) => None,
        }
    }
}

/// Commands a cover state machine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverCommand {
    Open,
    Close,
    Stop,
}
