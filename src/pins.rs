//! GPIO pin assignments for the DualCover controller board (ESP32-S3).
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Motor relays (two per channel, H-bridge wiring)
// ---------------------------------------------------------------------------

/// Channel A (M1), output A: energized = open direction.
pub const RELAY_M1A_GPIO: i32 = 4;
/// Channel A (M1), output B: energized = close direction.
pub const RELAY_M1B_GPIO: i32 = 5;
/// Channel B (M2), output A.
pub const RELAY_M2A_GPIO: i32 = 6;
/// Channel B (M2), output B.
pub const RELAY_M2B_GPIO: i32 = 7;

// ---------------------------------------------------------------------------
// Push buttons (shared by both channels, pull-up inputs)
// ---------------------------------------------------------------------------

pub const BUTTON_OPEN_GPIO: i32 = 15;
pub const BUTTON_CLOSE_GPIO: i32 = 16;
pub const BUTTON_STOP_GPIO: i32 = 17;

// ---------------------------------------------------------------------------
// Limit switches (pull-up inputs)
// ---------------------------------------------------------------------------

/// S1: channel A top.
pub const ENDSW_S1_UP_GPIO: i32 = 8;
/// S2: channel A bottom.
pub const ENDSW_S2_DOWN_GPIO: i32 = 9;
/// S3: channel B top.
pub const ENDSW_S3_UP_GPIO: i32 = 10;
/// S4: channel B bottom.
pub const ENDSW_S4_DOWN_GPIO: i32 = 11;

// ---------------------------------------------------------------------------
// Configuration jumpers (pull-up inputs, fitted jumper = LOW)
// ---------------------------------------------------------------------------

/// J1: channel A limit logic. LOW = NO, HIGH = NC.
pub const JUMP_1_GPIO: i32 = 12;
/// J2: channel B limit logic. LOW = NO, HIGH = NC.
pub const JUMP_2_GPIO: i32 = 13;
/// J3: open button logic. LOW = push once, HIGH = hold to move.
pub const JUMP_3_GPIO: i32 = 14;
/// J4: close button logic. LOW = push once, HIGH = hold to move.
pub const JUMP_4_GPIO: i32 = 18;

// ---------------------------------------------------------------------------
// Signal lamps
// ---------------------------------------------------------------------------

pub const SIGNAL_LIGHT_A_GPIO: i32 = 1;
pub const SIGNAL_LIGHT_B_GPIO: i32 = 2;

/// On-board LED, mirrors the blink phase as a heartbeat.
pub const HEARTBEAT_LED_GPIO: i32 = 48;

/// Every pin configured as a pull-up input.
pub const INPUT_PINS: [i32; 11] = [
    BUTTON_OPEN_GPIO,
    BUTTON_CLOSE_GPIO,
    BUTTON_STOP_GPIO,
    ENDSW_S1_UP_GPIO,
    ENDSW_S2_DOWN_GPIO,
    ENDSW_S3_UP_GPIO,
    ENDSW_S4_DOWN_GPIO,
    JUMP_1_GPIO,
    JUMP_2_GPIO,
    JUMP_3_GPIO,
    JUMP_4_GPIO,
];

/// Every pin configured as a push-pull output.
pub const OUTPUT_PINS: [i32; 7] = [
    RELAY_M1A_GPIO,
    RELAY_M1B_GPIO,
    RELAY_M2A_GPIO,
    RELAY_M2B_GPIO,
    SIGNAL_LIGHT_A_GPIO,
    SIGNAL_LIGHT_B_GPIO,
    HEARTBEAT_LED_GPIO,
];
