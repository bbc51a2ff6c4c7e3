//! System configuration parameters
//!
//! Tunable timing and control parameters for the thermostat.  User-facing
//! settings (set points, schedules, override) live in
//! [`SettingsStore`](crate::settings::SettingsStore); this struct only holds
//! what an installer would set once.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::drivers::relay::Polarity;
use crate::sensors::ds18b20::Resolution;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Timing ---
    /// Control loop interval (milliseconds)
    pub control_loop_interval_ms: u32,
    /// Interval between temperature conversion requests (milliseconds)
    pub sample_request_interval_ms: u32,
    /// Telemetry report interval (seconds)
    pub telemetry_interval_secs: u32,

    // --- Sensor ---
    /// DS18B20 resolution in bits (9-12); sets the conversion delay
    pub sensor_resolution_bits: u8,

    // --- Heater ---
    /// Hysteresis half-band (Celsius) on each side of the target
    pub hysteresis_c: f32,
    /// Relay input is active-low (see [`relay_polarity`](Self::relay_polarity))
    pub relay_active_low: bool,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Timing
            control_loop_interval_ms: 100,       // 10 Hz
            sample_request_interval_ms: 60_000, // 1/min
            telemetry_interval_secs: 60,

            // Sensor
            sensor_resolution_bits: 11, // 0.125 C steps, 375 ms conversion

            // Heater
            hysteresis_c: 1.0,
            relay_active_low: false,
        }
    }
}

impl SystemConfig {
    /// Reject values the control loop cannot run with.  Nothing is clamped.
    pub fn validate(&self) -> Result<()> {
        if !(10..=5_000).contains(&self.control_loop_interval_ms) {
            return Err(Error::Config("control_loop_interval_ms must be 10..=5000"));
        }
        let resolution = self
            .resolution()
            .ok_or(Error::Config("sensor_resolution_bits must be 9..=12"))?;
        if self.sample_request_interval_ms <= resolution.conversion_delay_ms() {
            return Err(Error::Config(
                "sample_request_interval_ms must exceed the conversion delay",
            ));
        }
        if !(self.hysteresis_c > 0.0 && self.hysteresis_c <= 5.0) {
            return Err(Error::Config("hysteresis_c must be in (0, 5]"));
        }
        if self.telemetry_interval_secs == 0 {
            return Err(Error::Config("telemetry_interval_secs must be non-zero"));
        }
        Ok(())
    }

    pub fn resolution(&self) -> Option<Resolution> {
        Resolution::from_bits(self.sensor_resolution_bits)
    }

    /// Pin level that energises the heater relay.
    pub fn relay_polarity(&self) -> Polarity {
        if self.relay_active_low {
            Polarity::ActiveLow
        } else {
            Polarity::ActiveHigh
        }
    }

    /// Conversion delay for the configured resolution (12-bit worst case
    /// if the resolution is invalid).
    pub fn conversion_delay_ms(&self) -> u32 {
        self.resolution()
            .unwrap_or(Resolution::Bits12)
            .conversion_delay_ms()
    }

    /// Control ticks between telemetry reports (at least one).
    pub fn telemetry_every_ticks(&self) -> u64 {
        let ticks = u64::from(self.telemetry_interval_secs) * 1000
            / u64::from(self.control_loop_interval_ms.max(1));
        ticks.max(1)
    }
}
