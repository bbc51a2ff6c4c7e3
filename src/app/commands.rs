//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (settings API,
//! console, automation) that the
//! [`ControlService`](super::service::ControlService) interprets and acts upon.

use crate::settings::SettingsPatch;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Apply a partial settings edit (validated first, all-or-nothing).
    UpdateSettings(SettingsPatch),

    /// Hold `target_c` from `start` (inclusive) to `end` (exclusive),
    /// both UTC epoch seconds.
    StartOverride { target_c: f32, start: i64, end: i64 },

    /// Clear any configured override window.
    CancelOverride,
}

impl AppCommand {
    /// Express the command as a settings patch.
    pub fn into_patch(self) -> SettingsPatch {
        match self {
            Self::UpdateSettings(patch) => patch,
            Self::StartOverride { target_c, start, end } => {
                SettingsPatch::override_window(f64::from(target_c), start, end)
            }
            Self::CancelOverride => SettingsPatch {
                override_start: Some(0),
                override_end: Some(0),
                ..SettingsPatch::default()
            },
        }
    }
}
