//! One-shot GPIO initialization and raw pin access.
//!
//! Configures every input (buttons, limit switches, jumpers) with its
//! pull-up and every output (relays, lamps, heartbeat) in its safe off
//! level using raw ESP-IDF sys calls.  Called once from `main()` before
//! the poll loop starts.
//!
//! [`GpioInput`] and [`GpioOutput`] wrap a configured pin number in the
//! `embedded_hal::digital` traits so the drivers above stay generic.  On
//! simulation targets the levels live in an in-memory table that tests
//! can poke with [`sim_set_level`].

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};
use log::info;

#[cfg(target_os = "espidf")]
use crate::error::Error;
use crate::error::Result;
use crate::pins;

/// Relay pins, driven to their off level before anything else.
const RELAY_PINS: [i32; 4] = [
    pins::RELAY_M1A_GPIO,
    pins::RELAY_M1B_GPIO,
    pins::RELAY_M2A_GPIO,
    pins::RELAY_M2B_GPIO,
];

#[cfg(target_os = "espidf")]
pub fn init_gpio(relays_active_low: bool) -> Result<()> {
    // SAFETY: Called once from main() before the poll loop; single-threaded.
    unsafe {
        for &pin in &pins::INPUT_PINS {
            let cfg = gpio_config_t {
                pin_bit_mask: 1u64 << pin,
                mode: gpio_mode_t_GPIO_MODE_INPUT,
                pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
                pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
                intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
            };
            let ret = gpio_config(&cfg);
            if ret != ESP_OK {
                log::error!("hw_init: input GPIO{pin} config failed (rc={ret})");
                return Err(Error::Init("gpio input config"));
            }
        }
        info!("hw_init: {} GPIO inputs configured", pins::INPUT_PINS.len());

        for &pin in &pins::OUTPUT_PINS {
            // Latch the off level first so the pin never glitches on.
            gpio_set_level(pin, u32::from(off_level(pin, relays_active_low)));
            let cfg = gpio_config_t {
                pin_bit_mask: 1u64 << pin,
                mode: gpio_mode_t_GPIO_MODE_OUTPUT,
                pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
                pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
                intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
            };
            let ret = gpio_config(&cfg);
            if ret != ESP_OK {
                log::error!("hw_init: output GPIO{pin} config failed (rc={ret})");
                return Err(Error::Init("gpio output config"));
            }
        }
        info!("hw_init: {} GPIO outputs configured", pins::OUTPUT_PINS.len());
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_gpio(relays_active_low: bool) -> Result<()> {
    for &pin in &pins::OUTPUT_PINS {
        sim::set(pin, off_level(pin, relays_active_low));
    }
    info!("hw_init(sim): outputs parked, inputs idle high");
    Ok(())
}

/// Level that leaves `pin` de-energized.
fn off_level(pin: i32, relays_active_low: bool) -> bool {
    RELAY_PINS.contains(&pin) && relays_active_low
}

// ── Pin wrappers ──────────────────────────────────────────────

/// Raw driver error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioError(pub i32);

impl embedded_hal::digital::Error for GpioError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// A pin configured as input by [`init_gpio`].
#[derive(Debug)]
pub struct GpioInput {
    pin: i32,
}

impl GpioInput {
    pub fn new(pin: i32) -> Self {
        Self { pin }
    }
}

impl ErrorType for GpioInput {
    type Error = GpioError;
}

impl InputPin for GpioInput {
    fn is_high(&mut self) -> core::result::Result<bool, GpioError> {
        Ok(gpio_read(self.pin))
    }

    fn is_low(&mut self) -> core::result::Result<bool, GpioError> {
        Ok(!gpio_read(self.pin))
    }
}

/// A pin configured as output by [`init_gpio`].
#[derive(Debug)]
pub struct GpioOutput {
    pin: i32,
}

impl GpioOutput {
    pub fn new(pin: i32) -> Self {
        Self { pin }
    }
}

impl ErrorType for GpioOutput {
    type Error = GpioError;
}

impl OutputPin for GpioOutput {
    fn set_low(&mut self) -> core::result::Result<(), GpioError> {
        gpio_write(self.pin, false)
    }

    fn set_high(&mut self) -> core::result::Result<(), GpioError> {
        gpio_write(self.pin, true)
    }
}

#[cfg(target_os = "espidf")]
fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(target_os = "espidf"))]
fn gpio_read(pin: i32) -> bool {
    sim::get(pin)
}

#[cfg(target_os = "espidf")]
fn gpio_write(pin: i32, high: bool) -> core::result::Result<(), GpioError> {
    // SAFETY: gpio_set_level writes to a pin configured in init_gpio();
    // poll loop only.
    let ret = unsafe { gpio_set_level(pin, u32::from(high)) };
    if ret == ESP_OK { Ok(()) } else { Err(GpioError(ret)) }
}

#[cfg(not(target_os = "espidf"))]
fn gpio_write(pin: i32, high: bool) -> core::result::Result<(), GpioError> {
    sim::set(pin, high);
    Ok(())
}

// ── Simulation ────────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
mod sim {
    use core::sync::atomic::{AtomicBool, Ordering};

    const PIN_COUNT: usize = 49;

    /// Inputs idle HIGH, as with the real pull-ups.
    static LEVELS: [AtomicBool; PIN_COUNT] = [const { AtomicBool::new(true) }; PIN_COUNT];

    pub(super) fn get(pin: i32) -> bool {
        usize::try_from(pin)
            .ok()
            .and_then(|i| LEVELS.get(i))
            .is_some_and(|l| l.load(Ordering::Relaxed))
    }

    pub(super) fn set(pin: i32, high: bool) {
        if let Some(level) = usize::try_from(pin).ok().and_then(|i| LEVELS.get(i)) {
            level.store(high, Ordering::Relaxed);
        }
    }
}

/// Drive a simulated pin (host builds only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_level(pin: i32, high: bool) {
    sim::set(pin, high);
}

/// Read back a simulated pin (host builds only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_level(pin: i32) -> bool {
    sim::get(pin)
}
