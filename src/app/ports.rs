//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlService (domain)
//! ```
//!
//! Driven adapters (thermometer, heater relay, clock, event sinks) implement
//! these traits.  The [`ControlService`](super::service::ControlService)
//! consumes them via generics, so the domain core never touches hardware,
//! the network clock, or timezone rules directly.

use crate::error::SensorError;
use crate::schedule::{LocalTime, Moment};
use crate::sensors::ds18b20::{Resolution, SensorAddress};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// One-wire thermometer.  Conversions are split into request and read so
/// the control loop never blocks waiting for the device.
pub trait SensorPort {
    /// Find the first device on the bus.
    fn discover(&mut self) -> Result<SensorAddress, SensorError>;

    /// Select the device and set its resolution.
    fn configure(&mut self, address: &SensorAddress, resolution: Resolution);

    /// Start a temperature conversion and return immediately.
    fn request_conversion(&mut self);

    /// Fetch the result of the last conversion in °C.
    fn read_celsius(&mut self) -> Result<f32, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Heater port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain commands the heater relay.
pub trait HeaterPort {
    /// Energise (`true`) or release (`false`) the heater.
    fn set_heater(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: time source → domain)
// ───────────────────────────────────────────────────────────────

/// Monotonic and wall-clock time.
pub trait ClockPort {
    /// Milliseconds since boot.  Wraps at `u32::MAX`.
    fn monotonic_ms(&self) -> u32;

    /// Seconds since the Unix epoch, or `None` until the clock is synced.
    fn now_utc(&mut self) -> Option<i64>;

    /// Convert a UTC timestamp to local wall-clock fields (timezone + DST).
    fn to_local(&self, timestamp: i64) -> LocalTime;

    /// Current instant in both forms, or `None` until synced.
    fn now(&mut self) -> Option<Moment> {
        let timestamp = self.now_utc()?;
        Some(Moment::new(timestamp, self.to_local(timestamp)))
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
