//! Per-channel cover state machine.
//!
//! One [`CoverFsm`] exists per motor channel and is the only writer of that
//! channel's [`CoverState`].  Each poll cycle feeds it two kinds of input,
//! in this order:
//!
//! ```text
//!   LimitCondition ──▶ apply_limits()  ── Fault? ──▶ (cycle ends, Unknown)
//!                                          │
//!   CoverCommand(s) ─────────────────▶ apply_command()
//!                                          │
//!   blink phase ─────────────────────▶ outputs()  ──▶ relays + indicator
//! ```
//!
//! `Open` and `Closed` can only be asserted by the limit switches;
//! `Opening` and `Closing` only by a command.

pub mod states;

use crate::app::commands::CoverCommand;
use crate::sensors::limit_switch::LimitCondition;
use states::ChannelOutputs;

// ---------------------------------------------------------------------------
// Channel identity
// ---------------------------------------------------------------------------

/// Motor channel.  Both channels share the push buttons but have their own
/// limit switches, relays, and indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Channel {
    /// Motor M1.
    A = 0,
    /// Motor M2.
    B = 1,
}

impl Channel {
    pub const COUNT: usize = 2;
    pub const ALL: [Channel; Channel::COUNT] = [Channel::A, Channel::B];

    pub const fn index(self) -> usize {
        self as usize
    }
}

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CoverState {
    /// Commanded halt; position not known.
    Stopped = 0,
    Opening = 1,
    Closing = 2,
    /// Top limit switch active.
    Open = 3,
    /// Bottom limit switch active.
    Closed = 4,
    /// No motion history yet, left a limit without a command, or wiring fault.
    Unknown = 5,
}

impl CoverState {
    /// Total number of states, used to size the output table.
    pub const COUNT: usize = 6;

    /// Name shown on the diagnostic output (`STOP`, `OPENING`, ...).
    pub fn name(self) -> &'static str {
        states::descriptor(self).name
    }
}

/// Result of the limit-switch stage of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitOutcome {
    /// Both switches active: forced to `Unknown`, commands are skipped.
    Fault,
    /// A limit rule moved the state.
    Transition(CoverState),
    Unchanged,
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CoverFsm {
    channel: Channel,
    state: CoverState,
}

impl CoverFsm {
    /// A fresh channel starts in `Unknown`: nothing has been observed yet.
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            state: CoverState::Unknown,
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn state(&self) -> CoverState {
        self.state
    }

    /// Evaluate the limit-switch rules.  First match wins:
    ///
    /// 1. both active → `Unknown` (fault)
    /// 2. top active, not `Closing`, not `Open` → `Open`
    /// 3. bottom active, not `Opening`, not `Closed` → `Closed`
    /// 4. top inactive while `Open` → `Unknown`
    /// 5. bottom inactive while `Closed` → `Unknown`
    pub fn apply_limits(&mut self, condition: LimitCondition) -> LimitOutcome {
        if condition == LimitCondition::Fault {
            self.state = CoverState::Unknown;
            return LimitOutcome::Fault;
        }

        let top = condition.top_active();
        let bottom = condition.bottom_active();
        let next = match self.state {
            s if top && !matches!(s, CoverState::Closing | CoverState::Open) => {
                Some(CoverState::Open)
            }
            s if bottom && !matches!(s, CoverState::Opening | CoverState::Closed) => {
                Some(CoverState::Closed)
            }
            CoverState::Open if !top => Some(CoverState::Unknown),
            CoverState::Closed if !bottom => Some(CoverState::Unknown),
            _ => None,
        };

        match next {
            Some(state) => {
                self.state = state;
                LimitOutcome::Transition(state)
            }
            None => LimitOutcome::Unchanged,
        }
    }

    /// Apply a command derived from a button event.  Returns `true` if the
    /// state changed.
    pub fn apply_command(&mut self, command: CoverCommand) -> bool {
        let next = match (command, self.state) {
            // Already at the limit the command drives towards.
            (CoverCommand::Open, CoverState::Open) | (CoverCommand::Close, CoverState::Closed) => {
                return false;
            }
            (CoverCommand::Open, _) => CoverState::Opening,
            (CoverCommand::Close, _) => CoverState::Closing,
            // Nothing is moving and no position is known, so there is
            // nothing to halt.
            (CoverCommand::Stop, CoverState::Unknown) => return false,
            (CoverCommand::Stop, _) => CoverState::Stopped,
        };

        let changed = next != self.state;
        self.state = next;
        changed
    }

    /// Outputs for the current state given this cycle's blink phase.
    pub fn outputs(&self, blink_phase: bool) -> ChannelOutputs {
        ChannelOutputs::resolve(self.state, blink_phase)
    }
}
