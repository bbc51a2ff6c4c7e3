//! Serializable views of the settings store.

use serde::Serialize;

use super::SettingsStore;
use crate::schedule::{DailySchedule, SetPoint};

/// The user-settings document, borrowed from a [`SettingsStore`].
///
/// Serializes to the same shape a [`SettingsPatch`](super::SettingsPatch)
/// accepts, so a fetched document can be edited and sent back as-is.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDocument<'a> {
    pub set_points: &'a [SetPoint; 4],
    pub daily_schedules: &'a [DailySchedule; 4],
    pub weekly_schedule: u16,
    pub temp_override: f32,
    pub override_start: i64,
    pub override_end: i64,
}

impl<'a> SettingsDocument<'a> {
    pub fn from_store(store: &'a SettingsStore) -> Self {
        let o = store.temp_override();
        Self {
            set_points: store.set_points(),
            daily_schedules: store.daily_schedules(),
            weekly_schedule: store.weekly().bits(),
            temp_override: o.target,
            override_start: o.start,
            override_end: o.end,
        }
    }

    pub fn to_json(&self) -> String {
        // Every field is a plain number, string or array; this cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}
