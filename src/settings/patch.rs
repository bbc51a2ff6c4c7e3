//! Wire form of a user-settings edit.

use log::debug;
use serde::Deserialize;

use crate::error::ValidationError;
use crate::schedule::{DailySchedulePatch, SetPointPatch};

/// Partial edit of the whole [`SettingsStore`](super::SettingsStore).
///
/// Every field is optional.  Numbers are kept wide (`i64`/`f64`) so a
/// value outside the stored type's range surfaces as a validation error
/// instead of a parse error.  Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub set_points: Option<Vec<SetPointPatch>>,
    pub daily_schedules: Option<Vec<DailySchedulePatch>>,
    pub weekly_schedule: Option<i64>,
    pub temp_override: Option<f64>,
    pub override_start: Option<i64>,
    pub override_end: Option<i64>,
}

impl SettingsPatch {
    /// Parse a JSON document.  Wrong JSON types are [`ValidationError::Malformed`].
    pub fn from_json(body: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(body).map_err(|e| {
            debug!("settings patch rejected by parser: {}", e);
            ValidationError::Malformed
        })
    }

    /// A patch that only moves the override window and target.
    pub fn override_window(target: f64, start: i64, end: i64) -> Self {
        Self {
            temp_override: Some(target),
            override_start: Some(start),
            override_end: Some(end),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
