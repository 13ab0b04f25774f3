//! Per-state output table.
//!
//! Every poll cycle the service looks up the current [`CoverState`] here
//! and drives the actuator and indicator accordingly, whether or not a
//! transition happened in that cycle.
//!
//! | State   | Actuator      | Indicator |
//! |---------|---------------|-----------|
//! | Stopped | both off      | off       |
//! | Opening | A on, B off   | flashing  |
//! | Closing | A off, B on   | flashing  |
//! | Open    | both off      | off       |
//! | Closed  | both off      | off       |
//! | Unknown | both off      | flashing  |

use super::CoverState;

/// What the relay pair of a channel should be doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drive {
    /// Both outputs de-energized.
    Off,
    /// Output A energized, B de-energized (open direction).
    OutputA,
    /// Output A de-energized, B energized (close direction).
    OutputB,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorMode {
    Off,
    /// Follows the shared blink phase.
    Flashing,
}

/// Static descriptor for a single cover state.
pub struct StateDescriptor {
    pub id: CoverState,
    /// Name used on the diagnostic output.
    pub name: &'static str,
    pub drive: Drive,
    pub indicator: IndicatorMode,
}

/// Indexed by `CoverState as usize`.
pub const STATE_TABLE: [StateDescriptor; CoverState::COUNT] = [
    StateDescriptor {
        id: CoverState::Stopped,
        name: "STOP",
        drive: Drive::Off,
        indicator: IndicatorMode::Off,
    },
    StateDescriptor {
        id: CoverState::Opening,
        name: "OPENING",
        drive: Drive::OutputA,
        indicator: IndicatorMode::Flashing,
    },
    StateDescriptor {
        id: CoverState::Closing,
        name: "CLOSING",
        drive: Drive::OutputB,
        indicator: IndicatorMode::Flashing,
    },
    StateDescriptor {
        id: CoverState::Open,
        name: "OPEN",
        drive: Drive::Off,
        indicator: IndicatorMode::Off,
    },
    StateDescriptor {
        id: CoverState::Closed,
        name: "CLOSED",
        drive: Drive::Off,
        indicator: IndicatorMode::Off,
    },
    StateDescriptor {
        id: CoverState::Unknown,
        name: "UNKNOWN",
        drive: Drive::Off,
        indicator: IndicatorMode::Flashing,
    },
];

/// Look up the descriptor of `state`.
pub fn descriptor(state: CoverState) -> &'static StateDescriptor {
    &STATE_TABLE[state as usize]
}

/// Resolved outputs of one channel for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelOutputs {
    pub drive: Drive,
    pub indicator: bool,
}

impl ChannelOutputs {
    /// Resolve the outputs of `state` against the blink phase sampled for
    /// this cycle.
    pub fn resolve(state: CoverState, blink_phase: bool) -> Self {
        let d = descriptor(state);
        Self {
            drive: d.drive,
            indicator: match d.indicator {
                IndicatorMode::Off => false,
                IndicatorMode::Flashing => blink_phase,
            },
        }
    }
}
