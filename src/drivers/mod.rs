//! Input, actuator and timing drivers plus raw GPIO setup.

pub mod blink;
pub mod button;
pub mod hw_init;
pub mod hw_timer;
pub mod indicator;
pub mod relay;
pub mod watchdog;
