//! Safety supervisor.
//!
//! The supervisor runs **every cycle before the state machines** and keeps
//! a fault bitmask, one bit per channel.  The only fault it knows is a
//! limit-switch conflict: both ends of a travel reporting active at once,
//! which means a broken or mis-jumpered switch.
//!
//! ## Fault lifecycle
//!
//! 1. A channel classifies as [`LimitCondition::Fault`].
//! 2. The supervisor sets that channel's bit and reports
//!    [`FaultChange::Raised`]; the channel's state machine forces itself
//!    to `Unknown` and its relays stay off.
//! 3. Each cycle the supervisor re-evaluates.  When the switches stop
//!    conflicting it clears the bit and reports [`FaultChange::Cleared`].
//!
//! Faults on the two channels are independent.

use crate::error::SafetyFault;
use crate::fsm::Channel;
use crate::sensors::limit_switch::LimitCondition;
use log::{error, info};

/// Result of one evaluation for one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultChange {
    Unchanged,
    Raised(SafetyFault),
    Cleared(SafetyFault),
}

#[derive(Debug, Default)]
pub struct SafetySupervisor {
    /// Latched fault bitmask.
    faults: u8,
}

impl SafetySupervisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate one channel's classified limit condition.
    pub fn evaluate(&mut self, channel: Channel, condition: LimitCondition) -> FaultChange {
        let fault = SafetyFault::limit_conflict(channel);
        let active = self.has_fault(fault);

        match (condition == LimitCondition::Fault, active) {
            (true, false) => {
                error!("SAFETY FAULT SET: {fault}");
                self.faults |= fault.mask();
                FaultChange::Raised(fault)
            }
            (false, true) => {
                info!("SAFETY FAULT CLEARED: {fault}");
                self.faults &= !fault.mask();
                FaultChange::Cleared(fault)
            }
            _ => FaultChange::Unchanged,
        }
    }

    /// Current fault bitmask.
    pub fn faults(&self) -> u8 {
        self.faults
    }

    /// True if **any** fault is active.
    pub fn has_faults(&self) -> bool {
        self.faults != 0
    }

    pub fn has_fault(&self, fault: SafetyFault) -> bool {
        self.faults & fault.mask() != 0
    }
}
