//! Limit switch reader.
//!
//! Each channel has a top and a bottom endstop wired to pull-up inputs.
//! The meaning of a pin level depends on the switch type fitted:
//!
//! | Switch type       | Triggered level | Logical active when |
//! |-------------------|-----------------|---------------------|
//! | normally-open     | LOW             | level is LOW        |
//! | normally-closed   | HIGH            | level is HIGH       |
//!
//! i.e. active ⇔ `level_high == normally_closed`.  The polarity is taken
//! from the channel's jumper every cycle, so a switch can be rewired live.

use crate::fsm::Channel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchPolarity {
    NormallyOpen,
    NormallyClosed,
}

impl SwitchPolarity {
    /// Whether a switch at raw `level_high` is triggered.
    pub fn is_active(self, level_high: bool) -> bool {
        level_high == (self == SwitchPolarity::NormallyClosed)
    }
}

/// Raw pin levels of one channel's switches (`true` = HIGH).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LimitLevels {
    pub top: bool,
    pub bottom: bool,
}

/// Instantaneous logical condition of a channel's switch pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitCondition {
    AtTop,
    AtBottom,
    /// Both switches active at once.
    Fault,
    Neither,
}

impl LimitCondition {
    pub fn top_active(self) -> bool {
        matches!(self, LimitCondition::AtTop | LimitCondition::Fault)
    }

    pub fn bottom_active(self) -> bool {
        matches!(self, LimitCondition::AtBottom | LimitCondition::Fault)
    }
}

/// Stateless apart from the polarity, which the caller refreshes each cycle.
#[derive(Debug, Clone)]
pub struct LimitSwitchReader {
    channel: Channel,
    polarity: SwitchPolarity,
}

impl LimitSwitchReader {
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            polarity: SwitchPolarity::NormallyOpen,
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn polarity(&self) -> SwitchPolarity {
        self.polarity
    }

    pub fn set_polarity(&mut self, polarity: SwitchPolarity) {
        self.polarity = polarity;
    }

    pub fn classify(&self, levels: LimitLevels) -> LimitCondition {
        let top = self.polarity.is_active(levels.top);
        let bottom = self.polarity.is_active(levels.bottom);
        match (top, bottom) {
            (true, true) => LimitCondition::Fault,
            (true, false) => LimitCondition::AtTop,
            (false, true) => LimitCondition::AtBottom,
            (false, false) => LimitCondition::Neither,
        }
    }
}
