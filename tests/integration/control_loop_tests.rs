//! Integration tests for the ControlService tick pipeline:
//! clock → sampler → settings resolution → hysteresis → heater port.

use super::mock_hw::{HwCall, LogSink, MockClock, MockHardware, monday};

use thermite::app::commands::AppCommand;
use thermite::app::events::AppEvent;
use thermite::app::service::ControlService;
use thermite::app::state::Lifecycle;
use thermite::config::SystemConfig;
use thermite::control::HeaterState;
use thermite::error::SensorError;
use thermite::sensors::ds18b20::{Resolution, SensorAddress};
use thermite::settings::{SettingsStore, TargetSource};

/// Default config: 60 s request interval, 375 ms conversion delay.
fn make_app() -> (ControlService, SettingsStore, MockHardware, LogSink) {
    let mut app = ControlService::new(&SystemConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = LogSink::new();
    app.start(&mut hw, &mut sink).expect("mock sensor should start");
    hw.clear();
    (app, SettingsStore::default(), hw, sink)
}

/// Request a conversion, wait out the delay, and read `reading`.
fn sample(
    app: &mut ControlService,
    settings: &SettingsStore,
    clock: &mut MockClock,
    hw: &mut MockHardware,
    sink: &mut LogSink,
    reading: f32,
) {
    hw.reading = Ok(reading);
    clock.advance_ms(60_001);
    app.tick(settings, clock, hw, sink);
    clock.advance_ms(400);
    app.tick(settings, clock, hw, sink);
}

// ── Startup ──────────────────────────────────────────────────

#[test]
fn start_configures_eleven_bit_resolution() {
    let mut app = ControlService::new(&SystemConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = LogSink::new();

    let address = app.start(&mut hw, &mut sink).unwrap();

    assert_eq!(hw.calls, [HwCall::Discover, HwCall::Configure(Resolution::Bits11)]);
    assert_eq!(app.lifecycle(), Lifecycle::Running);
    assert_eq!(app.sensor_address(), Some(address));
    assert!(matches!(sink.events.as_slice(), [AppEvent::Started(a)] if *a == address));
}

#[test]
fn bad_address_crc_leaves_service_uninitialized() {
    let mut app = ControlService::new(&SystemConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = LogSink::new();
    hw.address = Ok(SensorAddress([0x28, 1, 2, 3, 4, 5, 6, 0x00]));

    assert_eq!(app.start(&mut hw, &mut sink), Err(SensorError::AddressCrcMismatch));
    assert_eq!(app.lifecycle(), Lifecycle::Uninitialized);
    assert!(
        !hw.calls.iter().any(|c| matches!(c, HwCall::Configure(_))),
        "sensor must not be configured after a CRC failure"
    );
    assert!(matches!(
        sink.events.as_slice(),
        [AppEvent::InitFailed(SensorError::AddressCrcMismatch)]
    ));

    // Ticks are no-ops: no sensor traffic, no relay writes.
    hw.clear();
    let settings = SettingsStore::default();
    let mut clock = MockClock::monday(1_000, 9, 0);
    for _ in 0..10 {
        app.tick(&settings, &mut clock, &mut hw, &mut sink);
        clock.advance_ms(100);
    }
    assert!(hw.calls.is_empty());
    assert_eq!(app.tick_count(), 0);
    assert!(!app.internal_state(None).initialized);
}

#[test]
fn missing_sensor_leaves_service_uninitialized() {
    let mut app = ControlService::new(&SystemConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = LogSink::new();
    hw.address = Err(SensorError::NotFound);

    assert_eq!(app.start(&mut hw, &mut sink), Err(SensorError::NotFound));
    assert!(!app.is_running());
}

// ── Sampling ─────────────────────────────────────────────────

#[test]
fn first_tick_requests_and_skips_heater_decision() {
    let (mut app, settings, mut hw, mut sink) = make_app();
    let mut clock = MockClock::monday(1_000, 9, 0);

    app.tick(&settings, &mut clock, &mut hw, &mut sink);

    assert_eq!(hw.calls, [HwCall::RequestConversion, HwCall::SetHeater(false)]);
    assert_eq!(app.state().current_target, Some(20.0));
    assert_eq!(app.state().last_reading, None);
}

#[test]
fn reads_only_after_conversion_delay() {
    let (mut app, settings, mut hw, mut sink) = make_app();
    let mut clock = MockClock::monday(1_000, 9, 0);

    app.tick(&settings, &mut clock, &mut hw, &mut sink); // request @1000
    for _ in 0..3 {
        clock.advance_ms(100);
        app.tick(&settings, &mut clock, &mut hw, &mut sink); // 1100..1300
    }
    assert_eq!(hw.count(&HwCall::Read), 0);

    clock.advance_ms(100);
    app.tick(&settings, &mut clock, &mut hw, &mut sink); // 1400
    assert_eq!(hw.count(&HwCall::Read), 1);
    assert_eq!(app.state().last_reading, Some(20.0));
    assert_eq!(hw.count(&HwCall::RequestConversion), 1);
}

#[test]
fn wraparound_resyncs_without_requesting() {
    let (mut app, settings, mut hw, mut sink) = make_app();
    let mut clock = MockClock::monday(u32::MAX - 100, 9, 0);

    app.tick(&settings, &mut clock, &mut hw, &mut sink);
    assert_eq!(app.state().last_sample_requested_at, Some(u32::MAX - 100));
    hw.clear();

    clock.advance_ms(200); // wraps to 99
    app.tick(&settings, &mut clock, &mut hw, &mut sink);

    assert_eq!(clock.ms, 99);
    assert_eq!(app.state().last_sample_requested_at, Some(99));
    assert_eq!(hw.count(&HwCall::RequestConversion), 0);
    assert_eq!(hw.count(&HwCall::Read), 0);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::ClockWrapped { now_ms: 99 })),
        1
    );

    // The next request comes a full interval after the re-anchor.
    clock.ms = 60_099;
    app.tick(&settings, &mut clock, &mut hw, &mut sink);
    assert_eq!(hw.count(&HwCall::RequestConversion), 0);
    clock.ms = 60_100;
    app.tick(&settings, &mut clock, &mut hw, &mut sink);
    assert_eq!(hw.count(&HwCall::RequestConversion), 1);
}

#[test]
fn disconnected_read_keeps_last_reading() {
    let (mut app, settings, mut hw, mut sink) = make_app();
    let mut clock = MockClock::monday(0, 9, 0);

    sample(&mut app, &settings, &mut clock, &mut hw, &mut sink, 18.5);
    assert_eq!(app.state().last_reading, Some(18.5));

    hw.reading = Err(SensorError::Disconnected);
    for _ in 0..5 {
        clock.advance_ms(100);
        app.tick(&settings, &mut clock, &mut hw, &mut sink);
    }
    assert_eq!(app.state().last_reading, Some(18.5));
    assert_eq!(sink.count(|e| matches!(e, AppEvent::SensorLost)), 1);
    assert!(!app.build_telemetry().sensor_connected);

    hw.reading = Ok(19.0);
    clock.advance_ms(100);
    app.tick(&settings, &mut clock, &mut hw, &mut sink);
    assert_eq!(app.state().last_reading, Some(19.0));
    assert_eq!(sink.count(|e| matches!(e, AppEvent::SensorRestored(_))), 1);
}

// ── Target + heater ──────────────────────────────────────────

#[test]
fn unsynced_clock_never_drives_heater() {
    let (mut app, settings, mut hw, mut sink) = make_app();
    let mut clock = MockClock::unsynced(0);

    sample(&mut app, &settings, &mut clock, &mut hw, &mut sink, 5.0);

    assert_eq!(app.state().last_reading, Some(5.0));
    assert_eq!(app.state().current_target, None);
    assert_eq!(app.heater(), HeaterState::Off);
    assert!(!hw.heater_on());
}

#[test]
fn hysteresis_sequence_against_home_office_target() {
    let (mut app, settings, mut hw, mut sink) = make_app();
    // Monday 09:00 → Work from Home → Home Office (20 °C).
    let mut clock = MockClock::monday(0, 9, 0);

    let mut seen = Vec::new();
    for reading in [21.5, 19.5, 19.0, 18.9] {
        sample(&mut app, &settings, &mut clock, &mut hw, &mut sink, reading);
        seen.push(app.heater());
    }

    assert_eq!(
        seen,
        [HeaterState::Off, HeaterState::Off, HeaterState::On, HeaterState::On]
    );
    assert!(hw.heater_on());
    assert_eq!(
        sink.count(|e| matches!(
            e,
            AppEvent::HeaterChanged {
                from: HeaterState::Off,
                to: HeaterState::On
            }
        )),
        1
    );
}

#[test]
fn heater_written_every_running_tick() {
    let (mut app, settings, mut hw, mut sink) = make_app();
    let mut clock = MockClock::monday(0, 9, 0);
    for _ in 0..7 {
        app.tick(&settings, &mut clock, &mut hw, &mut sink);
        clock.advance_ms(100);
    }
    assert_eq!(hw.count(&HwCall::SetHeater(false)), 7);
}

#[test]
fn schedule_boundary_changes_target() {
    let (mut app, settings, mut hw, mut sink) = make_app();
    let mut clock = MockClock::monday(0, 7, 59);

    app.tick(&settings, &mut clock, &mut hw, &mut sink);
    assert_eq!(app.state().current_target, Some(17.0));

    clock.now = Some(monday(8, 0));
    clock.advance_ms(100);
    app.tick(&settings, &mut clock, &mut hw, &mut sink);
    assert_eq!(app.state().current_target, Some(20.0));

    let changes: Vec<_> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::TargetChanged { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(changes, [(None, 17.0), (Some(17.0), 20.0)]);
}

#[test]
fn override_command_flips_heater_on_next_tick() {
    let (mut app, mut settings, mut hw, mut sink) = make_app();
    let mut clock = MockClock::monday(0, 9, 0);

    // 20.5 °C against a 20 °C target sits in the band: heater stays off.
    sample(&mut app, &settings, &mut clock, &mut hw, &mut sink, 20.5);
    assert_eq!(app.heater(), HeaterState::Off);

    let now = monday(9, 0).timestamp;
    app.handle_command(
        AppCommand::StartOverride {
            target_c: 25.0,
            start: now - 3600,
            end: now + 3600,
        },
        &mut settings,
        &mut sink,
    )
    .unwrap();

    clock.advance_ms(100);
    app.tick(&settings, &mut clock, &mut hw, &mut sink);
    assert_eq!(app.state().current_target, Some(25.0));
    assert_eq!(app.heater(), HeaterState::On);
    assert!(sink.events.iter().any(|e| matches!(
        e,
        AppEvent::TargetChanged {
            source: TargetSource::Override,
            ..
        }
    )));

    app.handle_command(AppCommand::CancelOverride, &mut settings, &mut sink)
        .unwrap();
    clock.advance_ms(100);
    app.tick(&settings, &mut clock, &mut hw, &mut sink);
    assert_eq!(app.state().current_target, Some(20.0));
}

#[test]
fn rejected_command_reports_and_changes_nothing() {
    let (app, mut settings, _hw, mut sink) = make_app();
    let before = settings.clone();

    let err = app
        .handle_command(
            AppCommand::StartOverride {
                target_c: 35.0,
                start: 1_000,
                end: 2_000,
            },
            &mut settings,
            &mut sink,
        )
        .unwrap_err();

    assert_eq!(settings, before);
    assert!(matches!(
        sink.events.last(),
        Some(AppEvent::SettingsRejected(e)) if *e == err
    ));
}
