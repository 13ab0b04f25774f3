//! Configuration jumpers.
//!
//! Four pull-up inputs; a fitted jumper pulls the pin LOW.
//!
//! | Jumper | LOW (fitted)        | HIGH (removed)   |
//! |--------|---------------------|------------------|
//! | J1     | ch. A limits NO     | ch. A limits NC  |
//! | J2     | ch. B limits NO     | ch. B limits NC  |
//! | J3     | Open: push once     | Open: hold       |
//! | J4     | Close: push once    | Close: hold      |
//!
//! They are decoded every cycle so the operator can change wiring without
//! a reboot.

use super::limit_switch::SwitchPolarity;
use crate::fsm::Channel;

/// Raw jumper levels (`true` = HIGH).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JumperLevels {
    /// J1, J2 indexed by channel.
    pub limit_logic: [bool; Channel::COUNT],
    /// J3.
    pub open_logic: bool,
    /// J4.
    pub close_logic: bool,
}

/// Per-channel live configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelConfig {
    pub uses_normally_closed_limit_switches: bool,
}

impl ChannelConfig {
    pub fn polarity(self) -> SwitchPolarity {
        if self.uses_normally_closed_limit_switches {
            SwitchPolarity::NormallyClosed
        } else {
            SwitchPolarity::NormallyOpen
        }
    }
}

/// Button behaviour per direction, shared by both channels.
///
/// With hold-to-move set, releasing that direction's button stops both
/// channels; otherwise one press latches motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonMode {
    pub hold_to_open: bool,
    pub hold_to_close: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JumperSettings {
    pub channels: [ChannelConfig; Channel::COUNT],
    pub mode: ButtonMode,
}

impl JumperSettings {
    pub fn decode(levels: JumperLevels) -> Self {
        Self {
            channels: levels.limit_logic.map(|nc| ChannelConfig {
                uses_normally_closed_limit_switches: nc,
            }),
            mode: ButtonMode {
                hold_to_open: levels.open_logic,
                hold_to_close: levels.close_logic,
            },
        }
    }

    pub fn channel(&self, channel: Channel) -> ChannelConfig {
        self.channels[channel.index()]
    }
}
