//! Control-loop state and its serializable view.

use serde::Serialize;

use crate::control::HeaterState;
use crate::schedule::Moment;
use crate::schedule::time::ISO8601_CAPACITY;

/// Whether the sensor came up at startup.  There is no way back from
/// `Uninitialized` without a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Running,
}

/// Snapshot of everything the loop owns between ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlState {
    pub last_sample_requested_at: Option<u32>,
    /// Last good reading (°C).  `None` until the first successful read.
    pub last_reading: Option<f32>,
    /// Last resolved target (°C).  `None` until the clock first syncs.
    pub current_target: Option<f32>,
    pub heater: HeaterState,
}

/// The internal-state document served next to the user settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalStateDocument {
    /// Local wall-clock time, ISO 8601 with offset.
    pub date_time: Option<heapless::String<ISO8601_CAPACITY>>,
    pub heater: bool,
    pub temp: Option<f32>,
    pub temp_target: Option<f32>,
    pub initialized: bool,
}

impl InternalStateDocument {
    pub fn new(state: &ControlState, lifecycle: Lifecycle, now: Option<&Moment>) -> Self {
        Self {
            date_time: now.map(|m| m.local.to_iso8601()),
            heater: state.heater.is_on(),
            temp: state.last_reading,
            temp_target: state.current_target,
            initialized: lifecycle == Lifecycle::Running,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
