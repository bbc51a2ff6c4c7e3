//! Two-state heater control with a symmetric deadband.
//!
//! ```text
//!   reading ≤ target − H  ──▶ On
//!   reading ≥ target + H  ──▶ Off
//!   otherwise             ──▶ unchanged
//! ```
//!
//! The band keeps the relay from chattering when the room sits right at
//! the target.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaterState {
    #[default]
    Off,
    On,
}

impl HeaterState {
    pub fn is_on(self) -> bool {
        self == Self::On
    }
}

/// Bang-bang controller with hysteresis band `band_c` on each side.
#[derive(Debug, Clone)]
pub struct Hysteresis {
    band_c: f32,
    state: HeaterState,
}

impl Hysteresis {
    pub fn new(band_c: f32) -> Self {
        Self {
            band_c,
            state: HeaterState::Off,
        }
    }

    /// Feed one reading against `target_c`; returns the resulting state.
    pub fn update(&mut self, reading_c: f32, target_c: f32) -> HeaterState {
        if reading_c <= target_c - self.band_c {
            self.state = HeaterState::On;
        } else if reading_c >= target_c + self.band_c {
            self.state = HeaterState::Off;
        }
        self.state
    }

    pub fn state(&self) -> HeaterState {
        self.state
    }

    pub fn band_c(&self) -> f32 {
        self.band_c
    }
}
