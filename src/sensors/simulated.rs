//! Simulated room for running the controller without hardware.
//!
//! A first-order thermal model: the room loses heat towards the outside
//! temperature and gains a fixed rate while the heater is on.  Readings go
//! through the DS18B20 encoding so they are quantised like the real device.
//!
//! ```text
//!   dT/dt = (T_out - T) / tau  +  heater * gain
//! ```

use crate::app::ports::{HeaterPort, SensorPort};
use crate::error::SensorError;

use super::ds18b20::{self, FAMILY_CODE, Resolution, SensorAddress};

/// Room model that is both the thermometer and the heater.
#[derive(Debug, Clone)]
pub struct SimulatedRoom {
    room_c: f32,
    outside_c: f32,
    /// Heat-loss time constant (seconds).
    tau_secs: f32,
    /// Warming rate with the heater on (°C per second).
    heater_gain_c_per_sec: f32,
    heater_on: bool,
    resolution: Resolution,
    address: SensorAddress,
    /// Result latched by the last conversion request.
    latched: Option<f32>,
    connected: bool,
}

impl SimulatedRoom {
    pub fn new(room_c: f32, outside_c: f32) -> Self {
        Self {
            room_c,
            outside_c,
            tau_secs: 3.0 * 3600.0,
            heater_gain_c_per_sec: 2.0 / 3600.0,
            heater_on: false,
            resolution: Resolution::Bits12,
            address: SensorAddress::with_crc(FAMILY_CODE, [0x5E, 0x1A, 0x70, 0x00, 0x00, 0x01]),
            latched: None,
            connected: true,
        }
    }

    /// Override the model's time constant and heater gain.
    pub fn with_dynamics(mut self, tau_secs: f32, heater_gain_c_per_sec: f32) -> Self {
        self.tau_secs = tau_secs.max(1.0);
        self.heater_gain_c_per_sec = heater_gain_c_per_sec;
        self
    }

    /// Advance the model by `dt_secs`.
    pub fn advance(&mut self, dt_secs: f32) {
        let loss = (self.outside_c - self.room_c) / self.tau_secs;
        let gain = if self.heater_on {
            self.heater_gain_c_per_sec
        } else {
            0.0
        };
        self.room_c += (loss + gain) * dt_secs;
    }

    /// Unplug or replug the probe.
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    pub fn room_c(&self) -> f32 {
        self.room_c
    }

    pub fn heater_on(&self) -> bool {
        self.heater_on
    }
}

impl SensorPort for SimulatedRoom {
    fn discover(&mut self) -> Result<SensorAddress, SensorError> {
        if self.connected {
            Ok(self.address)
        } else {
            Err(SensorError::NotFound)
        }
    }

    fn configure(&mut self, _address: &SensorAddress, resolution: Resolution) {
        self.resolution = resolution;
    }

    fn request_conversion(&mut self) {
        self.latched = self.connected.then(|| {
            let raw = ds18b20::celsius_to_raw(self.room_c, self.resolution);
            ds18b20::raw_to_celsius(raw, self.resolution)
        });
    }

    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        let reading = match self.latched {
            Some(c) if self.connected => c,
            _ => ds18b20::DISCONNECTED_C,
        };
        ds18b20::check_reading(reading)
    }
}

impl HeaterPort for SimulatedRoom {
    fn set_heater(&mut self, on: bool) {
        self.heater_on = on;
    }
}
