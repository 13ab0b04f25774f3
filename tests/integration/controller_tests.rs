//! Integration tests for the ControllerService → CoverFsm → actuators
//! pipeline.
//!
//! These run on the host (x86_64) and drive the full poll cycle (raw
//! levels in, relay and lamp commands out) against the mock adapters.

use crate::mock_hw::{ActuatorCall, Rig};

use dualcover::app::commands::ButtonId;
use dualcover::app::events::AppEvent;
use dualcover::error::{Error, InputError, SafetyFault};
use dualcover::fsm::states::Drive;
use dualcover::fsm::{Channel, CoverState};

const A: Channel = Channel::A;
const B: Channel = Channel::B;

/// Put `channel`'s cover on its top limit.
fn open_fully(rig: &mut Rig, channel: Channel) {
    rig.hw.set_limits(channel, true, false);
    rig.cycle();
    assert_eq!(rig.state(channel), CoverState::Open);
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn starts_unknown_with_relays_off() {
    let mut rig = Rig::new();
    assert_eq!(
        rig.sink.events[0],
        AppEvent::Started {
            initial: CoverState::Unknown
        }
    );
    rig.cycle();
    for ch in Channel::ALL {
        assert_eq!(rig.state(ch), CoverState::Unknown);
        assert_eq!(rig.hw.drive(ch), Some(Drive::Off));
    }
    assert!(rig.sink.transitions(A).is_empty());
}

#[test]
fn unknown_indicator_follows_blink_phase() {
    let mut rig = Rig::new();
    rig.cycle();
    assert!(!rig.hw.indicator(A));
    rig.blink.toggle();
    rig.cycle();
    assert!(rig.hw.indicator(A));
    assert!(rig.hw.indicator(B));
}

// ── Fault handling ────────────────────────────────────────────

#[test]
fn both_switches_active_forces_unknown_from_motion() {
    let mut rig = Rig::new();
    rig.press(ButtonId::Open);
    assert_eq!(rig.state(A), CoverState::Opening);
    assert_eq!(rig.hw.drive(A), Some(Drive::OutputA));

    rig.hw.set_limits(A, true, true);
    rig.cycle();

    assert_eq!(rig.state(A), CoverState::Unknown);
    assert_eq!(rig.hw.drive(A), Some(Drive::Off));
    assert!(rig
        .sink
        .events
        .contains(&AppEvent::FaultDetected(SafetyFault::LimitConflictA)));
    assert_eq!(rig.app.fault_flags(), SafetyFault::LimitConflictA.mask());

    // The other channel keeps moving.
    assert_eq!(rig.state(B), CoverState::Opening);
    assert_eq!(rig.hw.drive(B), Some(Drive::OutputA));
}

#[test]
fn fault_from_every_steady_state_lands_in_unknown() {
    let setups: [fn(&mut Rig); 3] = [
        |r| r.click(ButtonId::Close),
        |r| open_fully(r, A),
        |r| {
            r.click(ButtonId::Open);
            r.click(ButtonId::Stop);
        },
    ];
    for setup in setups {
        let mut rig = Rig::new();
        setup(&mut rig);
        rig.hw.set_limits(A, true, true);
        rig.cycle();
        assert_eq!(rig.state(A), CoverState::Unknown);
        assert_eq!(rig.hw.drive(A), Some(Drive::Off));
    }
}

#[test]
fn faulted_channel_ignores_buttons_until_cleared() {
    let mut rig = Rig::new();
    rig.hw.set_limits(A, true, true);
    rig.cycle();

    rig.press(ButtonId::Open);
    assert_eq!(rig.state(A), CoverState::Unknown);
    assert_eq!(rig.state(B), CoverState::Opening);

    rig.hw.set_limits(A, false, false);
    rig.cycle();
    assert!(rig
        .sink
        .events
        .contains(&AppEvent::FaultCleared(SafetyFault::LimitConflictA)));
    assert_eq!(rig.app.fault_flags(), 0);
    // Recovery needs a fresh, unambiguous event.
    assert_eq!(rig.state(A), CoverState::Unknown);

    rig.release(ButtonId::Open);
    rig.press(ButtonId::Open);
    assert_eq!(rig.state(A), CoverState::Opening);
}

// ── Limit switches ────────────────────────────────────────────

#[test]
fn open_is_only_reached_through_the_top_switch() {
    let mut rig = Rig::new();
    rig.press(ButtonId::Open);
    assert_eq!(rig.state(A), CoverState::Opening);

    rig.hw.set_limits(A, true, false);
    rig.cycle();
    assert_eq!(rig.state(A), CoverState::Open);
    assert_eq!(rig.hw.drive(A), Some(Drive::Off));
    assert!(!rig.hw.indicator(A));
    assert_eq!(rig.state(B), CoverState::Opening);
}

#[test]
fn closed_is_only_reached_through_the_bottom_switch() {
    let mut rig = Rig::new();
    rig.click(ButtonId::Close);
    assert_eq!(rig.state(B), CoverState::Closing);
    assert_eq!(rig.hw.drive(B), Some(Drive::OutputB));

    rig.hw.set_limits(B, false, true);
    rig.cycle();
    assert_eq!(rig.state(B), CoverState::Closed);
    assert_eq!(rig.hw.drive(B), Some(Drive::Off));
}

#[test]
fn closing_away_from_top_is_not_reported_open() {
    let mut rig = Rig::new();
    open_fully(&mut rig, A);
    rig.click(ButtonId::Close);
    assert_eq!(rig.state(A), CoverState::Closing);

    // Top switch still pressed while the cover starts moving down.
    rig.cycle();
    assert_eq!(rig.state(A), CoverState::Closing);

    rig.hw.set_limits(A, false, false);
    rig.cycle();
    assert_eq!(rig.state(A), CoverState::Closing);
}

#[test]
fn closed_holds_while_bottom_active_then_goes_unknown() {
    let mut rig = Rig::new();
    rig.hw.set_limits(A, false, true);
    rig.cycle();
    assert_eq!(rig.state(A), CoverState::Closed);

    for _ in 0..5 {
        rig.cycle();
    }
    assert_eq!(rig.state(A), CoverState::Closed);

    rig.hw.set_limits(A, false, false);
    rig.cycle();
    assert_eq!(rig.state(A), CoverState::Unknown);
    assert_eq!(
        rig.sink.transitions(A),
        [
            (CoverState::Unknown, CoverState::Closed),
            (CoverState::Closed, CoverState::Unknown)
        ]
    );
}

#[test]
fn normally_closed_switches_read_inverted() {
    let mut rig = Rig::new();
    rig.hw.set_normally_closed(A, true);
    rig.hw.set_limits(A, true, false);
    rig.hw.set_limits(B, true, false);
    rig.cycle();

    assert_eq!(rig.state(A), CoverState::Open);
    assert_eq!(rig.state(B), CoverState::Open);
    // Same logical condition, opposite raw levels.
    assert_ne!(rig.hw.raw.limits[0], rig.hw.raw.limits[1]);
}

#[test]
fn rewiring_a_jumper_takes_effect_next_cycle() {
    let mut rig = Rig::new();
    rig.hw.set_limits(A, true, false);
    rig.cycle();
    assert_eq!(rig.state(A), CoverState::Open);

    // Levels untouched; only the interpretation flips.
    rig.hw.set_normally_closed(A, true);
    rig.cycle();
    assert_eq!(rig.state(A), CoverState::Closed);

    let jumper_events = rig
        .sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::JumpersChanged(_)))
        .count();
    assert_eq!(jumper_events, 2);
    let settings = rig.app.jumper_settings().unwrap();
    assert!(settings.channel(A).uses_normally_closed_limit_switches);
    assert!(!settings.channel(B).uses_normally_closed_limit_switches);
}

// ── Buttons ───────────────────────────────────────────────────

#[test]
fn open_press_drives_both_channels_even_from_closed() {
    let mut rig = Rig::new();
    rig.hw.set_limits(B, false, true);
    rig.cycle();
    assert_eq!(rig.state(B), CoverState::Closed);

    rig.press(ButtonId::Open);
    assert_eq!(rig.state(A), CoverState::Opening);
    assert_eq!(rig.state(B), CoverState::Opening);
    assert_eq!(rig.hw.drive(B), Some(Drive::OutputA));
}

#[test]
fn latched_release_keeps_moving() {
    let mut rig = Rig::new();
    rig.press(ButtonId::Open);
    rig.release(ButtonId::Open);
    assert_eq!(rig.state(A), CoverState::Opening);
    assert_eq!(rig.state(B), CoverState::Opening);
}

#[test]
fn hold_to_move_release_stops() {
    let mut rig = Rig::new();
    rig.hw.set_hold_to_move(true, false);
    rig.press(ButtonId::Open);
    assert_eq!(rig.state(A), CoverState::Opening);
    rig.release(ButtonId::Open);
    assert_eq!(rig.state(A), CoverState::Stopped);
    assert_eq!(rig.state(B), CoverState::Stopped);
    assert_eq!(rig.hw.drive(A), Some(Drive::Off));
}

#[test]
fn hold_mode_is_per_direction() {
    let mut rig = Rig::new();
    rig.hw.set_hold_to_move(true, false);
    rig.click(ButtonId::Close);
    assert_eq!(rig.state(A), CoverState::Closing);
}

#[test]
fn hold_release_on_unknown_channel_is_ignored() {
    let mut rig = Rig::new();
    rig.hw.set_hold_to_move(true, true);
    rig.press(ButtonId::Open);
    rig.hw.set_limits(A, true, true);
    rig.cycle();
    rig.hw.set_limits(A, false, false);
    rig.cycle();
    assert_eq!(rig.state(A), CoverState::Unknown);

    rig.release(ButtonId::Open);
    assert_eq!(rig.state(A), CoverState::Unknown);
    assert_eq!(rig.state(B), CoverState::Stopped);
}

#[test]
fn stop_on_unknown_stays_unknown() {
    let mut rig = Rig::new();
    rig.click(ButtonId::Stop);
    for ch in Channel::ALL {
        assert_eq!(rig.state(ch), CoverState::Unknown);
        assert!(rig.sink.transitions(ch).is_empty());
    }
}

#[test]
fn stop_arrests_motion() {
    let mut rig = Rig::new();
    rig.click(ButtonId::Close);
    rig.click(ButtonId::Stop);
    assert_eq!(rig.state(A), CoverState::Stopped);
    assert_eq!(rig.hw.drive(A), Some(Drive::Off));
    assert!(!rig.hw.indicator(A));
}

#[test]
fn stopped_then_open_energizes_a_and_flashes() {
    let mut rig = Rig::new();
    rig.click(ButtonId::Open);
    rig.click(ButtonId::Stop);
    assert_eq!(rig.state(A), CoverState::Stopped);

    rig.hw.calls.clear();
    rig.press(ButtonId::Open);
    assert_eq!(rig.state(A), CoverState::Opening);
    assert!(rig.hw.calls.contains(&ActuatorCall::EnergizeA(A)));
    assert!(!rig.hw.calls.contains(&ActuatorCall::EnergizeB(A)));

    let before = rig.hw.indicator(A);
    assert_eq!(before, rig.blink.phase());
    rig.blink.toggle();
    rig.cycle();
    assert_eq!(rig.hw.indicator(A), !before);
    // Both channels show the same phase.
    assert_eq!(rig.hw.indicator(B), rig.hw.indicator(A));
}

#[test]
fn simultaneous_presses_apply_stop_last() {
    let mut rig = Rig::new();
    rig.hw.set_button(ButtonId::Open, true);
    rig.hw.set_button(ButtonId::Close, true);
    rig.hw.set_button(ButtonId::Stop, true);
    rig.settle();
    assert_eq!(rig.state(A), CoverState::Stopped);
    // One diagnostic for the net change.
    assert_eq!(
        rig.sink.transitions(A),
        [(CoverState::Unknown, CoverState::Stopped)]
    );
}

#[test]
fn bounce_shorter_than_window_is_ignored() {
    let mut rig = Rig::new();
    for i in 0..40 {
        rig.hw.set_button(ButtonId::Open, i % 4 < 2);
        rig.cycle();
    }
    rig.hw.set_button(ButtonId::Open, false);
    rig.settle();
    assert_eq!(rig.state(A), CoverState::Unknown);
    assert!(rig.sink.transitions(A).is_empty());
}

#[test]
fn one_diagnostic_per_transition() {
    let mut rig = Rig::new();
    rig.press(ButtonId::Open);
    for _ in 0..50 {
        rig.cycle();
    }
    assert_eq!(
        rig.sink.transitions(A),
        [(CoverState::Unknown, CoverState::Opening)]
    );
}

// ── Input failures ────────────────────────────────────────────

#[test]
fn failed_read_kills_outputs_and_keeps_state() {
    let mut rig = Rig::new();
    rig.press(ButtonId::Open);
    assert_eq!(rig.hw.drive(A), Some(Drive::OutputA));

    rig.hw.fail_reads = true;
    rig.cycle();
    assert_eq!(rig.state(A), CoverState::Opening);
    assert_eq!(rig.hw.drive(A), Some(Drive::Off));
    assert_eq!(rig.hw.drive(B), Some(Drive::Off));
    assert_eq!(
        rig.sink.events.last(),
        Some(&AppEvent::InputFailure(Error::Input(InputError::LimitSwitch(A))))
    );

    rig.hw.fail_reads = false;
    rig.cycle();
    assert_eq!(rig.hw.drive(A), Some(Drive::OutputA));
}
