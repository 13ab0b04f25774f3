//! Shared blink phase for the signal lamps.
//!
//! One [`BlinkSource`] exists for the whole controller.  A periodic timer
//! ([`hw_timer`](super::hw_timer)) is its only writer and calls
//! [`toggle`](BlinkSource::toggle); the poll loop samples
//! [`phase`](BlinkSource::phase) once per cycle and renders every flashing
//! lamp from that single sample, which keeps both channels in step.
//!
//! The phase is a single `AtomicBool`, so a read racing the timer sees
//! either the old or the new phase, never a torn value, and the toggle is
//! one read-modify-write so no update is lost.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

pub struct BlinkSource {
    phase: AtomicBool,
    toggles: AtomicU32,
}

impl Default for BlinkSource {
    fn default() -> Self {
        Self::new()
    }
}

impl BlinkSource {
    /// Starts in the dark phase.  `const` so it can live in a `static`.
    pub const fn new() -> Self {
        Self {
            phase: AtomicBool::new(false),
            toggles: AtomicU32::new(0),
        }
    }

    /// Flip the phase.  Lock-free; callable from timer or interrupt context.
    pub fn toggle(&self) {
        self.phase.fetch_xor(true, Ordering::AcqRel);
        self.toggles.fetch_add(1, Ordering::Relaxed);
    }

    /// Current phase: `true` = lamps lit.
    pub fn phase(&self) -> bool {
        self.phase.load(Ordering::Acquire)
    }

    /// Number of toggles since boot (wraps).
    pub fn toggle_count(&self) -> u32 {
        self.toggles.load(Ordering::Relaxed)
    }
}
