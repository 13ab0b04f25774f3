//! Mock hardware adapter for integration tests.
//!
//! Holds the raw input levels a test wants the controller to see and
//! records every actuator call so tests can assert on the full command
//! history without touching real GPIO registers.

use dualcover::app::commands::ButtonId;
use dualcover::app::events::AppEvent;
use dualcover::app::ports::{ActuatorPort, EventSink, InputPort};
use dualcover::app::service::ControllerService;
use dualcover::config::ControllerConfig;
use dualcover::drivers::blink::BlinkSource;
use dualcover::drivers::button::ButtonLevels;
use dualcover::error::{InputError, Result};
use dualcover::fsm::states::Drive;
use dualcover::fsm::{Channel, CoverState};
use dualcover::sensors::jumpers::JumperLevels;
use dualcover::sensors::limit_switch::LimitLevels;
use dualcover::sensors::RawInputs;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    EnergizeA(Channel),
    EnergizeB(Channel),
    DeenergizeBoth(Channel),
    Indicator(Channel, bool),
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub raw: RawInputs,
    pub fail_reads: bool,
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockHardware {
    /// Idle board: buttons released (pulled HIGH), every jumper fitted
    /// (normally-open switches, push-once buttons), no switch triggered.
    pub fn new() -> Self {
        Self {
            raw: RawInputs {
                buttons: ButtonLevels {
                    open: true,
                    close: true,
                    stop: true,
                },
                limits: [LimitLevels { top: true, bottom: true }; Channel::COUNT],
                jumpers: JumperLevels::default(),
            },
            fail_reads: false,
            calls: Vec::new(),
        }
    }

    /// Hold or release a button (active-low).
    pub fn set_button(&mut self, id: ButtonId, pressed: bool) {
        let level = !pressed;
        match id {
            ButtonId::Open => self.raw.buttons.open = level,
            ButtonId::Close => self.raw.buttons.close = level,
            ButtonId::Stop => self.raw.buttons.stop = level,
        }
    }

    /// Trigger the channel's switches, translating through its jumper.
    pub fn set_limits(&mut self, channel: Channel, top_active: bool, bottom_active: bool) {
        let nc = self.raw.jumpers.limit_logic[channel.index()];
        self.raw.limits[channel.index()] = LimitLevels {
            top: top_active == nc,
            bottom: bottom_active == nc,
        };
    }

    /// J1/J2: `true` = normally-closed switches.
    pub fn set_normally_closed(&mut self, channel: Channel, nc: bool) {
        self.raw.jumpers.limit_logic[channel.index()] = nc;
    }

    /// J3/J4.
    pub fn set_hold_to_move(&mut self, open: bool, close: bool) {
        self.raw.jumpers.open_logic = open;
        self.raw.jumpers.close_logic = close;
    }

    /// Last relay command sent to `channel`.
    pub fn drive(&self, channel: Channel) -> Option<Drive> {
        self.calls.iter().rev().find_map(|c| match *c {
            ActuatorCall::EnergizeA(ch) if ch == channel => Some(Drive::OutputA),
            ActuatorCall::EnergizeB(ch) if ch == channel => Some(Drive::OutputB),
            ActuatorCall::DeenergizeBoth(ch) if ch == channel => Some(Drive::Off),
            _ => None,
        })
    }

    /// Last level written to `channel`'s lamp.
    pub fn indicator(&self, channel: Channel) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match *c {
                ActuatorCall::Indicator(ch, on) if ch == channel => Some(on),
                _ => None,
            })
            .unwrap_or(false)
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl InputPort for MockHardware {
    fn read_inputs(&mut self) -> Result<RawInputs> {
        if self.fail_reads {
            return Err(InputError::LimitSwitch(Channel::A).into());
        }
        Ok(self.raw)
    }
}

impl ActuatorPort for MockHardware {
    fn energize_output_a(&mut self, channel: Channel) {
        self.calls.push(ActuatorCall::EnergizeA(channel));
    }

    fn energize_output_b(&mut self, channel: Channel) {
        self.calls.push(ActuatorCall::EnergizeB(channel));
    }

    fn deenergize_both(&mut self, channel: Channel) {
        self.calls.push(ActuatorCall::DeenergizeBoth(channel));
    }

    fn set_indicator(&mut self, channel: Channel, on: bool) {
        self.calls.push(ActuatorCall::Indicator(channel, on));
    }
}

// ── CaptureSink ───────────────────────────────────────────────

#[derive(Default)]
pub struct CaptureSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl CaptureSink {
    pub fn transitions(&self, channel: Channel) -> Vec<(CoverState, CoverState)> {
        self.events
            .iter()
            .filter_map(|e| match *e {
                AppEvent::StateChanged { channel: ch, from, to } if ch == channel => {
                    Some((from, to))
                }
                _ => None,
            })
            .collect()
    }
}

impl EventSink for CaptureSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

// ── Rig ───────────────────────────────────────────────────────

/// Service plus mocks, with a millisecond clock advanced per cycle.
pub struct Rig {
    pub app: ControllerService,
    pub hw: MockHardware,
    pub sink: CaptureSink,
    pub blink: BlinkSource,
    pub now_ms: u32,
}

#[allow(dead_code)]
impl Rig {
    pub fn new() -> Self {
        let mut rig = Self {
            app: ControllerService::new(ControllerConfig::default()),
            hw: MockHardware::new(),
            sink: CaptureSink::default(),
            blink: BlinkSource::new(),
            now_ms: 0,
        };
        rig.app.start(&mut rig.hw, &mut rig.sink);
        rig
    }

    /// One poll cycle, 1 ms after the previous one.
    pub fn cycle(&mut self) {
        self.app
            .tick(&mut self.hw, &self.blink, self.now_ms, &mut self.sink);
        self.now_ms = self.now_ms.wrapping_add(1);
    }

    /// Enough cycles for any level change to clear the debounce window.
    pub fn settle(&mut self) {
        for _ in 0..10 {
            self.cycle();
        }
    }

    pub fn press(&mut self, id: ButtonId) {
        self.hw.set_button(id, true);
        self.settle();
    }

    pub fn release(&mut self, id: ButtonId) {
        self.hw.set_button(id, false);
        self.settle();
    }

    /// Press and release.
    pub fn click(&mut self, id: ButtonId) {
        self.press(id);
        self.release(id);
    }

    pub fn state(&self, channel: Channel) -> CoverState {
        self.app.state(channel)
    }
}
