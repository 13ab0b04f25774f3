//! Application core: pure domain logic, zero I/O.
//!
//! This module holds the controller's orchestration: one poll cycle reads
//! the inputs, debounces the buttons, evaluates both channels' limit
//! switches and state machines, and drives the outputs.  All interaction
//! with hardware happens through the **port traits** in [`ports`], keeping
//! this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
