//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the thermometer bus and the heater relay, exposing them through
//! [`SensorPort`] and [`HeaterPort`] as the single `hw` argument the
//! control loop expects.

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::app::ports::{HeaterPort, SensorPort};
use crate::drivers::relay::RelayDriver;
use crate::error::SensorError;
use crate::sensors::ds18b20::{Resolution, SensorAddress};

/// Concrete adapter that combines a thermometer and a relay behind port traits.
pub struct HardwareAdapter<S: SensorPort, P: OutputPin> {
    sensor: S,
    relay: RelayDriver<P>,
}

impl<S: SensorPort, P: OutputPin> HardwareAdapter<S, P> {
    pub fn new(sensor: S, relay: RelayDriver<P>) -> Self {
        Self { sensor, relay }
    }

    pub fn relay(&self) -> &RelayDriver<P> {
        &self.relay
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<S: SensorPort, P: OutputPin> SensorPort for HardwareAdapter<S, P> {
    fn discover(&mut self) -> Result<SensorAddress, SensorError> {
        self.sensor.discover()
    }

    fn configure(&mut self, address: &SensorAddress, resolution: Resolution) {
        self.sensor.configure(address, resolution);
    }

    fn request_conversion(&mut self) {
        self.sensor.request_conversion();
    }

    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        self.sensor.read_celsius()
    }
}

// ── HeaterPort implementation ─────────────────────────────────

impl<S: SensorPort, P: OutputPin> HeaterPort for HardwareAdapter<S, P> {
    fn set_heater(&mut self, on: bool) {
        // Written every tick; only touch the pin on change.
        if self.relay.is_on() == on {
            return;
        }
        if let Err(e) = self.relay.set(on) {
            warn!("Heater relay not switched: {}", e);
        }
    }
}
