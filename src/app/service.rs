//! Application service: the hexagonal core.
//!
//! [`ControlService`] owns the sampling schedule, the heater hysteresis and
//! the last reading/target.  It reads the [`SettingsStore`] but never owns
//! it: the store is passed in by reference each tick so a request handler
//! can hold it between ticks.
//!
//! ```text
//!  ClockPort ───▶ ┌──────────────────────────┐ ──▶ EventSink
//!  SensorPort ──▶ │      ControlService       │
//!                 │ Sampler · Resolve · Hyst. │
//!  HeaterPort ◀── └──────────────────────────┘
//!                          ▲
//!                    &SettingsStore
//! ```

use log::{debug, info, warn};

use crate::config::SystemConfig;
use crate::control::{HeaterState, Hysteresis, SampleAction, Sampler};
use crate::error::{SensorError, ValidationError};
use crate::schedule::Moment;
use crate::sensors::ds18b20::{FAMILY_CODE, Resolution, SensorAddress};
use crate::settings::SettingsStore;
use crate::update::Updatable;

use super::commands::AppCommand;
use super::events::{AppEvent, TelemetryData};
use super::ports::{ClockPort, EventSink, HeaterPort, SensorPort};
use super::state::{ControlState, InternalStateDocument, Lifecycle};

// ───────────────────────────────────────────────────────────────
// ControlService
// ───────────────────────────────────────────────────────────────

/// The control service orchestrates sampling, target resolution and heater
/// control.
pub struct ControlService {
    lifecycle: Lifecycle,
    resolution: Resolution,
    sampler: Sampler,
    heater: Hysteresis,
    last_reading: Option<f32>,
    current_target: Option<f32>,
    sensor_connected: bool,
    address: Option<SensorAddress>,
    tick_count: u64,
}

impl ControlService {
    /// Construct the service from configuration.
    ///
    /// Does **not** touch the sensor; call [`start`](Self::start) next.
    pub fn new(config: &SystemConfig) -> Self {
        let resolution = config.resolution().unwrap_or_else(|| {
            warn!(
                "Unsupported sensor resolution {} bits, using 12",
                config.sensor_resolution_bits
            );
            Resolution::Bits12
        });
        Self {
            lifecycle: Lifecycle::Uninitialized,
            resolution,
            sampler: Sampler::new(
                config.sample_request_interval_ms,
                resolution.conversion_delay_ms(),
            ),
            heater: Hysteresis::new(config.hysteresis_c),
            last_reading: None,
            current_target: None,
            sensor_connected: false,
            address: None,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Discover, verify and configure the thermometer.
    ///
    /// On failure the service stays [`Lifecycle::Uninitialized`] and every
    /// later [`tick`](Self::tick) is a no-op; the caller keeps running.
    pub fn start(
        &mut self,
        sensor: &mut impl SensorPort,
        sink: &mut impl EventSink,
    ) -> Result<SensorAddress, SensorError> {
        match self.init_sensor(sensor) {
            Ok(address) => {
                self.lifecycle = Lifecycle::Running;
                self.sensor_connected = true;
                self.address = Some(address);
                info!(
                    "ControlService started: sensor {} at {} bits ({} ms conversion)",
                    address,
                    self.resolution.bits(),
                    self.resolution.conversion_delay_ms()
                );
                sink.emit(&AppEvent::Started(address));
                Ok(address)
            }
            Err(e) => {
                warn!("Sensor init failed: {}; control loop disabled", e);
                sink.emit(&AppEvent::InitFailed(e));
                Err(e)
            }
        }
    }

    fn init_sensor(&self, sensor: &mut impl SensorPort) -> Result<SensorAddress, SensorError> {
        let address = sensor.discover()?;
        address.verify()?;
        if address.family() != FAMILY_CODE {
            warn!("Unexpected one-wire family 0x{:02x}, continuing", address.family());
        }
        sensor.configure(&address, self.resolution);
        Ok(address)
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle: sample → resolve target → hysteresis → relay.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`HeaterPort`], which avoids a double mutable borrow while keeping
    /// the port boundary explicit.
    pub fn tick(
        &mut self,
        settings: &SettingsStore,
        clock: &mut impl ClockPort,
        hw: &mut (impl SensorPort + HeaterPort),
        sink: &mut impl EventSink,
    ) {
        if self.lifecycle != Lifecycle::Running {
            return;
        }
        self.tick_count += 1;

        // 1. Sensor sampling
        let now_ms = clock.monotonic_ms();
        match self.sampler.poll(now_ms) {
            SampleAction::Request => {
                debug!("Requesting conversion at {} ms", now_ms);
                hw.request_conversion();
            }
            SampleAction::Read => self.read_sensor(hw, sink),
            SampleAction::Resync => {
                warn!("Monotonic clock wrapped at {} ms; re-anchoring sampler", now_ms);
                sink.emit(&AppEvent::ClockWrapped { now_ms });
            }
            SampleAction::Wait => {}
        }

        // 2. Target resolution (skipped until the wall clock is synced)
        if let Some(moment) = clock.now() {
            self.update_target(settings, &moment, sink);
        }

        // 3. Heater decision (needs both a target and a reading)
        if let (Some(reading), Some(target)) = (self.last_reading, self.current_target) {
            let from = self.heater.state();
            let to = self.heater.update(reading, target);
            if from != to {
                info!(
                    "Heater {:?} -> {:?} (reading {:.2} C, target {:.2} C)",
                    from, to, reading, target
                );
                sink.emit(&AppEvent::HeaterChanged { from, to });
            }
        }

        // 4. Relay
        hw.set_heater(self.heater.state().is_on());
    }

    fn read_sensor(&mut self, hw: &mut impl SensorPort, sink: &mut impl EventSink) {
        match hw.read_celsius() {
            Ok(celsius) => {
                if !self.sensor_connected {
                    self.sensor_connected = true;
                    info!("Sensor answering again: {:.2} C", celsius);
                    sink.emit(&AppEvent::SensorRestored(celsius));
                }
                self.last_reading = Some(celsius);
            }
            Err(e) => {
                if self.sensor_connected {
                    self.sensor_connected = false;
                    warn!("Sensor read failed: {}; holding last reading", e);
                    sink.emit(&AppEvent::SensorLost);
                }
            }
        }
    }

    fn update_target(&mut self, settings: &SettingsStore, moment: &Moment, sink: &mut impl EventSink) {
        let resolved = settings.resolve(moment);
        let from = self.current_target;
        if from != Some(resolved.celsius) {
            info!("Target -> {:.2} C ({:?})", resolved.celsius, resolved.source);
            sink.emit(&AppEvent::TargetChanged {
                from,
                to: resolved.celsius,
                source: resolved.source,
            });
        }
        self.current_target = Some(resolved.celsius);
    }

    // ── Command handling ──────────────────────────────────────

    /// Apply an external settings command.  Validation failures leave the
    /// store untouched and are reported through `sink` as well as returned.
    pub fn handle_command(
        &self,
        cmd: AppCommand,
        settings: &mut SettingsStore,
        sink: &mut impl EventSink,
    ) -> Result<(), ValidationError> {
        let patch = cmd.into_patch();
        match settings.update_safe(&patch) {
            Ok(()) => {
                sink.emit(&AppEvent::SettingsUpdated);
                Ok(())
            }
            Err(e) => {
                warn!("Settings update rejected: {}", e);
                sink.emit(&AppEvent::SettingsRejected(e));
                Err(e)
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a telemetry snapshot from the current state.
    pub fn build_telemetry(&self) -> TelemetryData {
        TelemetryData {
            initialized: self.is_running(),
            temperature_c: self.last_reading,
            target_c: self.current_target,
            heater: self.heater.state(),
            sensor_connected: self.sensor_connected,
            tick_count: self.tick_count,
        }
    }

    /// Internal-state document as of `now` (the request time, not the last tick).
    pub fn internal_state(&self, now: Option<&Moment>) -> InternalStateDocument {
        InternalStateDocument::new(&self.state(), self.lifecycle, now)
    }

    pub fn state(&self) -> ControlState {
        ControlState {
            last_sample_requested_at: self.sampler.last_requested_at(),
            last_reading: self.last_reading,
            current_target: self.current_target,
            heater: self.heater.state(),
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    pub fn heater(&self) -> HeaterState {
        self.heater.state()
    }

    pub fn sensor_address(&self) -> Option<SensorAddress> {
        self.address
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
