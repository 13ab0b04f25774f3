//! Application service: the hexagonal core.
//!
//! [`ControllerService`] owns the button debouncers, both channels' limit
//! readers and state machines, and the safety supervisor.  It exposes a
//! clean, hardware-agnostic API.  All I/O flows through port traits
//! injected at call sites, making the entire service testable with mock
//! adapters.
//!
//! ```text
//!   InputPort ──▶ ┌───────────────────────────┐ ──▶ EventSink
//!                 │     ControllerService      │
//! ActuatorPort ◀──│ Buttons · Limits · FSM x2  │◀── BlinkSource
//!                 └───────────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::config::ControllerConfig;
use crate::drivers::blink::BlinkSource;
use crate::drivers::button::{ButtonEvents, ButtonPanel};
use crate::fsm::states::Drive;
use crate::fsm::{Channel, CoverFsm, CoverState, LimitOutcome};
use crate::safety::{FaultChange, SafetySupervisor};
use crate::sensors::jumpers::{JumperLevels, JumperSettings};
use crate::sensors::limit_switch::{LimitLevels, LimitSwitchReader};

use super::events::AppEvent;
use super::ports::{ActuatorPort, EventSink, InputPort};

// ───────────────────────────────────────────────────────────────
// ControllerService
// ───────────────────────────────────────────────────────────────

pub struct ControllerService {
    config: ControllerConfig,
    buttons: ButtonPanel,
    limits: [LimitSwitchReader; Channel::COUNT],
    covers: [CoverFsm; Channel::COUNT],
    safety: SafetySupervisor,
    /// Last decoded jumpers; `None` until the first successful read.
    jumpers: Option<JumperSettings>,
    cycle_count: u64,
}

impl ControllerService {
    /// Construct the service from configuration.  Every channel starts in
    /// `Unknown`.
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            buttons: ButtonPanel::new(config.debounce_ms, config.buttons_active_low),
            limits: Channel::ALL.map(LimitSwitchReader::new),
            covers: Channel::ALL.map(CoverFsm::new),
            safety: SafetySupervisor::new(),
            jumpers: None,
            cycle_count: 0,
            config,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Force every output off and announce the initial state.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        hw.all_off();
        sink.emit(&AppEvent::Started {
            initial: CoverState::Unknown,
        });
        info!("ControllerService started, {} channels UNKNOWN", Channel::COUNT);
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one poll cycle: read inputs → buttons → per channel (limits →
    /// safety → FSM → outputs).
    ///
    /// The `hw` parameter satisfies **both** [`InputPort`] and
    /// [`ActuatorPort`]; this avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        hw: &mut (impl InputPort + ActuatorPort),
        blink: &BlinkSource,
        now_ms: u32,
        sink: &mut impl EventSink,
    ) {
        self.cycle_count += 1;

        // 1. Read inputs via InputPort
        let raw = match hw.read_inputs() {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Input read failed: {e}; outputs forced off");
                hw.all_off();
                sink.emit(&AppEvent::InputFailure(e));
                return;
            }
        };

        // 2. Live configuration and buttons
        let settings = self.refresh_jumpers(raw.jumpers, sink);
        let events = self.buttons.poll(raw.buttons, now_ms);
        if !events.is_empty() {
            debug!("Button events: {:?}", events.as_slice());
        }

        // 3. One blink sample for both channels
        let phase = blink.phase();

        // 4. Channels
        for channel in Channel::ALL {
            self.step_channel(
                channel,
                raw.limits[channel.index()],
                &events,
                settings,
                phase,
                hw,
                sink,
            );
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self, channel: Channel) -> CoverState {
        self.covers[channel.index()].state()
    }

    /// Current active fault bitmask (0 = no faults).
    pub fn fault_flags(&self) -> u8 {
        self.safety.faults()
    }

    /// Poll cycles executed since startup, including failed reads.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    pub fn jumper_settings(&self) -> Option<JumperSettings> {
        self.jumpers
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn refresh_jumpers(&mut self, levels: JumperLevels, sink: &mut impl EventSink) -> JumperSettings {
        let settings = JumperSettings::decode(levels);
        if self.jumpers != Some(settings) {
            info!(
                "Jumpers: limits A={:?} B={:?}, hold open={} close={}",
                settings.channel(Channel::A).polarity(),
                settings.channel(Channel::B).polarity(),
                settings.mode.hold_to_open,
                settings.mode.hold_to_close,
            );
            self.jumpers = Some(settings);
            sink.emit(&AppEvent::JumpersChanged(settings));
        }
        settings
    }

    #[allow(clippy::too_many_arguments)]
    fn step_channel(
        &mut self,
        channel: Channel,
        levels: LimitLevels,
        events: &ButtonEvents,
        settings: JumperSettings,
        blink_phase: bool,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        let i = channel.index();

        let reader = &mut self.limits[i];
        reader.set_polarity(settings.channel(channel).polarity());
        let condition = reader.classify(levels);

        match self.safety.evaluate(channel, condition) {
            FaultChange::Raised(fault) => sink.emit(&AppEvent::FaultDetected(fault)),
            FaultChange::Cleared(fault) => sink.emit(&AppEvent::FaultCleared(fault)),
            FaultChange::Unchanged => {}
        }

        let fsm = &mut self.covers[i];
        let from = fsm.state();

        // A conflict ends this channel's decisions for the cycle.
        if fsm.apply_limits(condition) != LimitOutcome::Fault {
            for command in events.iter().filter_map(|e| e.command(settings.mode)) {
                fsm.apply_command(command);
            }
        }

        let outputs = fsm.outputs(blink_phase);
        match outputs.drive {
            Drive::Off => hw.deenergize_both(channel),
            Drive::OutputA => hw.energize_output_a(channel),
            Drive::OutputB => hw.energize_output_b(channel),
        }
        hw.set_indicator(channel, outputs.indicator);

        let to = fsm.state();
        if to != from {
            sink.emit(&AppEvent::StateChanged { channel, from, to });
        }
    }
}
