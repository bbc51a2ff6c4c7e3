//! Thermite: host simulator entry point.
//!
//! Runs the real control loop against a simulated room and the system
//! clock, so schedules and settings files can be tried without hardware.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  HardwareAdapter    SystemClock     LogEventSink             │
//! │  (room + relay)     (ClockPort)     (EventSink)              │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ─────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │          ControlService (pure logic)               │      │
//! │  │  Sampler · Target resolution · Hysteresis          │      │
//! │  └────────────────────────────────────────────────────┘      │
//! │                         ▲                                    │
//! │                  SettingsStore ◀── api::put_user_settings    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage:
//!
//! ```text
//! thermite [--config FILE] [--settings FILE] [--ticks N]
//!          [--room C] [--outside C] [--wrap-soon]
//! ```
#![deny(unused_must_use)]

use core::convert::Infallible;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use embedded_hal::digital::{ErrorType, OutputPin};
use log::{debug, error, info};
use tracing_subscriber::filter::LevelFilter;

use thermite::adapters::clock::SystemClock;
use thermite::adapters::hardware::HardwareAdapter;
use thermite::adapters::log_sink::LogEventSink;
use thermite::api;
use thermite::app::events::AppEvent;
use thermite::app::ports::{ClockPort, EventSink, HeaterPort};
use thermite::app::service::ControlService;
use thermite::config::SystemConfig;
use thermite::error::Error;
use thermite::drivers::relay::RelayDriver;
use thermite::sensors::simulated::SimulatedRoom;
use thermite::settings::SettingsStore;

// ── Command line ──────────────────────────────────────────────

/// Run the thermostat control loop against a simulated room.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// System configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// User settings applied at startup, as sent to PUT /userSettings
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Stop after this many control ticks (runs forever by default)
    #[arg(long)]
    ticks: Option<u64>,

    /// Initial room temperature (Celsius)
    #[arg(long = "room", default_value_t = 17.0, allow_negative_numbers = true)]
    room_c: f32,

    /// Outside temperature (Celsius)
    #[arg(long = "outside", default_value_t = 5.0, allow_negative_numbers = true)]
    outside_c: f32,

    /// Start the monotonic counter ten seconds short of wrapping
    #[arg(long)]
    wrap_soon: bool,
}

// ── Simulated relay pin ───────────────────────────────────────

/// Output pin with nothing attached; level changes are only logged.
struct SimRelayPin;

impl ErrorType for SimRelayPin {
    type Error = Infallible;
}

impl OutputPin for SimRelayPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        debug!("relay pin low");
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        debug!("relay pin high");
        Ok(())
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<SystemConfig> {
    let config = match path {
        Some(p) => {
            let text = std::fs::read_to_string(p)
                .with_context(|| format!("reading config {}", p.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing config {}", p.display()))?
        }
        None => SystemConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::INFO)
        .init();

    info!("Thermite v{} starting", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;
    info!("Config: {:?}", config);

    // ── 3. Adapters ───────────────────────────────────────────
    let mut clock = SystemClock::local();
    if args.wrap_soon {
        // Wrap the monotonic counter ten seconds in.
        clock = clock.with_monotonic_offset(u32::MAX - 10_000);
    }
    let room = SimulatedRoom::new(args.room_c, args.outside_c);
    let relay = RelayDriver::new(SimRelayPin, config.relay_polarity()).map_err(Error::from)?;
    let mut hw = HardwareAdapter::new(room, relay);
    let mut sink = LogEventSink::new();

    // ── 4. Domain ─────────────────────────────────────────────
    let mut settings = SettingsStore::default();
    let mut service = ControlService::new(&config);

    if let Some(path) = &args.settings {
        let body = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings {}", path.display()))?;
        let resp = api::put_user_settings(&service, &mut settings, &body, &mut sink);
        if !resp.is_success() {
            bail!("settings file {} rejected: {}", path.display(), resp.body);
        }
    }

    if let Err(e) = service.start(&mut hw, &mut sink) {
        // Keep running so the state endpoints still answer.
        error!("Sensor unavailable ({}); heater control disabled", e);
    }

    // ── 5. Control loop ───────────────────────────────────────
    let tick = Duration::from_millis(u64::from(config.control_loop_interval_ms));
    let telemetry_every = config.telemetry_every_ticks();
    let mut n: u64 = 0;

    info!("System ready. Entering control loop.");
    while args.ticks.is_none_or(|limit| n < limit) {
        service.tick(&settings, &mut clock, &mut hw, &mut sink);
        // The room warms from whatever the relay contact is doing.
        let on = hw.relay().is_on();
        let room = hw.sensor_mut();
        room.set_heater(on);
        room.advance(tick.as_secs_f32());

        n += 1;
        if n % telemetry_every == 0 {
            sink.emit(&AppEvent::Telemetry(service.build_telemetry()));
        }
        std::thread::sleep(tick);
    }

    // ── 6. Final state ────────────────────────────────────────
    let now = clock.now();
    info!(
        "internalState: {}",
        api::get_internal_state(&service, now.as_ref()).body
    );
    info!("userSettings: {}", api::get_user_settings(&settings).body);
    Ok(())
}
