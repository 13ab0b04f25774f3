//! Debounced push buttons.
//!
//! ## Hardware
//!
//! Three momentary switches (Open, Close, Stop) with pull-ups, shared by
//! both motor channels.  The main loop samples their raw levels once per
//! poll cycle and hands them to [`ButtonPanel::poll`], which runs one
//! [`DebouncedButton`] per switch.
//!
//! ## Debounce
//!
//! A new level is accepted only after it has been seen continuously for
//! `debounce_ms`.  Any sample of the old level inside that window restarts
//! it, so contact bounce never produces an edge.  Each accepted transition
//! yields exactly one [`Edge`]; holding a button yields nothing further.
//!
//! Edges are returned to the caller as a per-cycle queue instead of being
//! delivered through callbacks.

use crate::app::commands::{ButtonEvent, ButtonId};

pub const BUTTON_COUNT: usize = 3;

/// Events produced by one poll of the panel, in Open, Close, Stop order.
pub type ButtonEvents = heapless::Vec<ButtonEvent, BUTTON_COUNT>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Pressed,
    Released,
}

/// Raw button levels (`true` = HIGH).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonLevels {
    pub open: bool,
    pub close: bool,
    pub stop: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DebounceState {
    Stable,
    Settling { since_ms: u32 },
}

#[derive(Debug, Clone)]
pub struct DebouncedButton {
    id: ButtonId,
    debounce_ms: u32,
    pressed: bool,
    state: DebounceState,
}

impl DebouncedButton {
    pub fn new(id: ButtonId, debounce_ms: u32) -> Self {
        Self {
            id,
            debounce_ms,
            pressed: false,
            state: DebounceState::Stable,
        }
    }

    pub fn id(&self) -> ButtonId {
        self.id
    }

    /// Debounced level.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Feed one sample.  `now_ms` is monotonic and may wrap.
    pub fn sample(&mut self, pressed: bool, now_ms: u32) -> Option<Edge> {
        if pressed == self.pressed {
            self.state = DebounceState::Stable;
            return None;
        }

        let since_ms = match self.state {
            DebounceState::Stable => {
                self.state = DebounceState::Settling { since_ms: now_ms };
                now_ms
            }
            DebounceState::Settling { since_ms } => since_ms,
        };

        if now_ms.wrapping_sub(since_ms) < self.debounce_ms {
            return None;
        }

        self.pressed = pressed;
        self.state = DebounceState::Stable;
        Some(if pressed { Edge::Pressed } else { Edge::Released })
    }
}

/// The three shared buttons.
pub struct ButtonPanel {
    buttons: [DebouncedButton; BUTTON_COUNT],
    active_low: bool,
}

impl ButtonPanel {
    pub fn new(debounce_ms: u32, active_low: bool) -> Self {
        Self {
            buttons: ButtonId::ALL.map(|id| DebouncedButton::new(id, debounce_ms)),
            active_low,
        }
    }

    /// Debounce this cycle's levels and return the accepted edges.
    pub fn poll(&mut self, levels: ButtonLevels, now_ms: u32) -> ButtonEvents {
        let active_low = self.active_low;
        let raw = [levels.open, levels.close, levels.stop];
        let mut events = ButtonEvents::new();

        for (button, level) in self.buttons.iter_mut().zip(raw) {
            if let Some(edge) = button.sample(level != active_low, now_ms) {
                // At most one edge per button per poll, so this never overflows.
                let _ = events.push(ButtonEvent::from_edge(button.id(), edge));
            }
        }
        events
    }

    pub fn is_pressed(&self, id: ButtonId) -> bool {
        self.buttons[id.index()].is_pressed()
    }
}
