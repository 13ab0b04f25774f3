//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements    | Connects to                      |
//! |------------|---------------|----------------------------------|
//! | `hardware` | InputPort     | button, limit, jumper GPIO       |
//! |            | ActuatorPort  | relay and lamp GPIO              |
//! | `log_sink` | EventSink     | Serial log output                |
//! | `time`     | (clock)       | ESP32 system timer               |

pub mod hardware;
pub mod log_sink;
pub mod time;
