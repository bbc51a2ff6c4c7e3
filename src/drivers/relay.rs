//! Heater relay driver.
//!
//! Wraps any `embedded-hal` [`OutputPin`] so the same driver runs on a board
//! GPIO or a host-side mock.  Relay modules come in both polarities, so the
//! logical "energised" state is mapped to a pin level at construction.

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::error::ActuatorError;

/// Pin level that energises the relay coil.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    ActiveHigh,
    ActiveLow,
}

pub struct RelayDriver<P: OutputPin> {
    pin: P,
    polarity: Polarity,
    energised: bool,
}

impl<P: OutputPin> RelayDriver<P> {
    /// Take ownership of `pin` and drive it to the released state.
    pub fn new(pin: P, polarity: Polarity) -> Result<Self, ActuatorError> {
        let mut relay = Self {
            pin,
            polarity,
            energised: true,
        };
        relay.set(false)?;
        Ok(relay)
    }

    /// Energise or release the relay.  The cached state only changes once
    /// the pin write succeeds.
    pub fn set(&mut self, on: bool) -> Result<(), ActuatorError> {
        let high = match self.polarity {
            Polarity::ActiveHigh => on,
            Polarity::ActiveLow => !on,
        };
        let res = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        res.map_err(|_| {
            warn!("Relay pin write failed (requested {})", if on { "on" } else { "off" });
            ActuatorError::GpioWriteFailed
        })?;
        self.energised = on;
        Ok(())
    }

    pub fn is_on(&self) -> bool {
        self.energised
    }

    /// Release the pin (e.g. to hand it back to the HAL).
    pub fn release(self) -> P {
        self.pin
    }
}
