//! Outbound application events.
//!
//! The [`ControlService`](super::service::ControlService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log to the console, push to a
//! dashboard, and so on.

use crate::control::hysteresis::HeaterState;
use crate::error::{SensorError, ValidationError};
use crate::sensors::ds18b20::SensorAddress;
use crate::settings::TargetSource;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),

    /// The sensor was found and configured; the loop is running.
    Started(SensorAddress),

    /// Sensor initialisation failed; the loop stays idle.
    InitFailed(SensorError),

    /// The heater decision flipped.
    HeaterChanged { from: HeaterState, to: HeaterState },

    /// The resolved target moved (schedule boundary, override, or edit).
    TargetChanged {
        from: Option<f32>,
        to: f32,
        source: TargetSource,
    },

    /// A read found the sensor disconnected; the last reading is kept.
    SensorLost,

    /// The sensor answered again after being lost.
    SensorRestored(f32),

    /// The monotonic counter went backwards; sampling was re-anchored.
    ClockWrapped { now_ms: u32 },

    /// A settings edit was validated and applied.
    SettingsUpdated,

    /// A settings edit was rejected; nothing changed.
    SettingsRejected(ValidationError),
}

/// A point-in-time telemetry snapshot suitable for logging or transmission.
#[derive(Debug, Clone)]
pub struct TelemetryData {
    pub initialized: bool,
    pub temperature_c: Option<f32>,
    pub target_c: Option<f32>,
    pub heater: HeaterState,
    pub sensor_connected: bool,
    pub tick_count: u64,
}
