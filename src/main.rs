//! DualCover Firmware: Main Entry Point
//!
//! Hexagonal architecture with a single tight poll loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter          LogEventSink       MonotonicClock    │
//! │  (Input+Actuator)         (EventSink)        (now_ms)          │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │           ControllerService (pure logic)               │    │
//! │  │  Buttons · Limit readers · Safety · CoverFsm x2        │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  esp_timer ──▶ BlinkSource (atomic phase) ◀── poll loop        │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use esp_idf_svc::hal::delay::FreeRtos;
use log::{info, warn};

use dualcover::adapters::hardware::HardwareAdapter;
use dualcover::adapters::log_sink::LogEventSink;
use dualcover::adapters::time::MonotonicClock;
use dualcover::app::service::ControllerService;
use dualcover::config::ControllerConfig;
use dualcover::drivers::blink::BlinkSource;
use dualcover::drivers::hw_init::{self, GpioInput, GpioOutput};
use dualcover::drivers::hw_timer;
use dualcover::drivers::indicator::Lamp;
use dualcover::drivers::relay::RelayPair;
use dualcover::drivers::watchdog::Watchdog;
use dualcover::error::OutputError;
use dualcover::pins;
use dualcover::sensors::{InputHub, InputPins};

/// Shared blink phase.  Written only by the esp_timer callback.
static BLINK: BlinkSource = BlinkSource::new();

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  DualCover v{}  DC motor control     ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = ControllerConfig::default();
    config.validate().context("controller config")?;

    // ── 3. Peripherals ────────────────────────────────────────
    hw_init::init_gpio(config.relays_active_low).context("GPIO init")?;
    let _blink_timer = hw_timer::start_blink_timer(&BLINK, config.blink_half_period_ms)
        .context("blink timer")?;
    let watchdog = Watchdog::new(config.watchdog_timeout_ms);
    let clock = MonotonicClock::new();

    let inputs = InputHub::new(InputPins {
        open_button: GpioInput::new(pins::BUTTON_OPEN_GPIO),
        close_button: GpioInput::new(pins::BUTTON_CLOSE_GPIO),
        stop_button: GpioInput::new(pins::BUTTON_STOP_GPIO),
        limits: [
            (
                GpioInput::new(pins::ENDSW_S1_UP_GPIO),
                GpioInput::new(pins::ENDSW_S2_DOWN_GPIO),
            ),
            (
                GpioInput::new(pins::ENDSW_S3_UP_GPIO),
                GpioInput::new(pins::ENDSW_S4_DOWN_GPIO),
            ),
        ],
        jumpers: [
            GpioInput::new(pins::JUMP_1_GPIO),
            GpioInput::new(pins::JUMP_2_GPIO),
            GpioInput::new(pins::JUMP_3_GPIO),
            GpioInput::new(pins::JUMP_4_GPIO),
        ],
    });
    let relays = [
        RelayPair::new(
            GpioOutput::new(pins::RELAY_M1A_GPIO),
            GpioOutput::new(pins::RELAY_M1B_GPIO),
            config.relays_active_low,
        ),
        RelayPair::new(
            GpioOutput::new(pins::RELAY_M2A_GPIO),
            GpioOutput::new(pins::RELAY_M2B_GPIO),
            config.relays_active_low,
        ),
    ];
    let lamps = [
        Lamp::new(GpioOutput::new(pins::SIGNAL_LIGHT_A_GPIO)),
        Lamp::new(GpioOutput::new(pins::SIGNAL_LIGHT_B_GPIO)),
    ];
    let mut hw = HardwareAdapter::new(inputs, relays, lamps);
    let mut heartbeat = Lamp::new(GpioOutput::new(pins::HEARTBEAT_LED_GPIO));

    // ── 4. Application service ────────────────────────────────
    let mut log_sink = LogEventSink::new();
    let poll_interval_ms = config.poll_interval_ms;
    let mut app = ControllerService::new(config);
    app.start(&mut hw, &mut log_sink);

    info!("System ready. Entering poll loop.");

    // ── 5. Poll loop ──────────────────────────────────────────
    loop {
        app.tick(&mut hw, &BLINK, clock.uptime_ms(), &mut log_sink);

        if let Err(e) = heartbeat.set(BLINK.phase()) {
            warn!("{}: {:?}", OutputError::Heartbeat, e);
        }

        // Feed watchdog on every iteration.
        watchdog.feed();

        FreeRtos::delay_ms(poll_interval_ms);
    }
}
