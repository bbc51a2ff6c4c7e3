//! Settings store: the user-editable state and the target resolver.
//!
//! ```text
//!   PUT body ──▶ SettingsPatch ──▶ check ──▶ apply ──▶ SettingsStore
//!                                                        │
//!   Moment ─────────────────────────▶ resolve_target ◀───┘
//! ```
//!
//! The store always holds exactly four set points, four daily schedules,
//! one weekly assignment and one override.  It is built once with
//! defaults and afterwards changes only through [`Updatable::update_safe`].

pub mod document;
pub mod patch;

use log::info;

use crate::error::ValidationError;
use crate::schedule::{DailySchedule, Moment, Name, Override, SetPoint, WeeklySchedule};
use crate::update::{self, Updatable};

pub use document::SettingsDocument;
pub use patch::SettingsPatch;

/// Where a resolved target came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSource {
    Override,
    Scheduled { daily_schedule: usize, set_point: usize },
}

/// A target temperature together with its provenance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedTarget {
    pub celsius: f32,
    pub source: TargetSource,
}

/// All user-editable thermostat settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsStore {
    set_points: [SetPoint; 4],
    daily_schedules: [DailySchedule; 4],
    weekly: WeeklySchedule,
    temp_override: Override,
}

impl Default for SettingsStore {
    fn default() -> Self {
        // Half-hour slot bytes: 0xAA = Sleep, 0x55 = Normal, 0x00 = Home Office.
        const WORK_FROM_HOME: [u8; 12] = [
            0xAA, 0xAA, 0xAA, 0x5A, 0x00, 0x00, 0x00, 0x00, 0x50, 0x55, 0xA5, 0xAA,
        ];
        const AT_THE_OFFICE: [u8; 12] = [
            0xAA, 0xAA, 0xAA, 0x5A, 0x55, 0x55, 0x55, 0x55, 0x55, 0x55, 0xA5, 0xAA,
        ];
        const DAY_OFF: [u8; 12] = [
            0xAA, 0xAA, 0xAA, 0xAA, 0x55, 0x55, 0x55, 0x55, 0x55, 0x55, 0x55, 0xAA,
        ];

        Self {
            set_points: [
                SetPoint::new(Name::fixed("Home Office"), 20.0),
                SetPoint::new(Name::fixed("Normal"), 17.0),
                SetPoint::new(Name::fixed("Sleep"), 16.0),
                SetPoint::new(Name::fixed("Vacation"), 14.0),
            ],
            daily_schedules: [
                DailySchedule::new(Name::fixed("Work from Home"), WORK_FROM_HOME),
                DailySchedule::new(Name::fixed("At the Office"), AT_THE_OFFICE),
                DailySchedule::new(Name::fixed("Day Off"), DAY_OFF),
                DailySchedule::new(Name::fixed("Other"), DAY_OFF),
            ],
            // Sunday and Saturday → Day Off, weekdays → Work from Home.
            weekly: WeeklySchedule::new(0x2002),
            temp_override: Override::inactive(14.0),
        }
    }
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Resolution ────────────────────────────────────────────

    /// Target temperature (°C) in effect at `at`.
    ///
    /// An active override wins; otherwise the weekday picks a daily
    /// schedule, the half hour picks a set point.
    pub fn resolve_target(&self, at: &Moment) -> f32 {
        self.resolve(at).celsius
    }

    /// Like [`resolve_target`](Self::resolve_target), also reporting which
    /// rule produced the value.
    pub fn resolve(&self, at: &Moment) -> ResolvedTarget {
        if self.temp_override.is_active(at.timestamp) {
            return ResolvedTarget {
                celsius: self.temp_override.target,
                source: TargetSource::Override,
            };
        }
        let daily_schedule = self.weekly.daily_schedule_index(&at.local);
        let set_point = self.daily_schedules[daily_schedule].target_index(&at.local);
        ResolvedTarget {
            celsius: self.set_points[set_point].target(),
            source: TargetSource::Scheduled {
                daily_schedule,
                set_point,
            },
        }
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn set_points(&self) -> &[SetPoint; 4] {
        &self.set_points
    }

    pub fn daily_schedules(&self) -> &[DailySchedule; 4] {
        &self.daily_schedules
    }

    pub fn weekly(&self) -> WeeklySchedule {
        self.weekly
    }

    pub fn temp_override(&self) -> &Override {
        &self.temp_override
    }

    /// Serializable snapshot for the user-settings endpoint.
    pub fn to_document(&self) -> SettingsDocument<'_> {
        SettingsDocument::from_store(self)
    }
}

impl Updatable for SettingsStore {
    type Patch = SettingsPatch;

    fn check(&self, patch: &SettingsPatch) -> Result<(), ValidationError> {
        if let Some(sps) = &patch.set_points {
            update::check_count("setPoints", sps)?;
            for (sp, p) in self.set_points.iter().zip(sps) {
                sp.check(p)?;
            }
        }
        if let Some(days) = &patch.daily_schedules {
            update::check_count("dailySchedules", days)?;
            for (d, p) in self.daily_schedules.iter().zip(days) {
                d.check(p)?;
            }
        }
        if let Some(w) = patch.weekly_schedule {
            update::check_weekly(w)?;
        }
        if let Some(t) = patch.temp_override {
            update::check_temperature(t)?;
        }
        if patch.override_start.is_some() || patch.override_end.is_some() {
            let start = patch.override_start.unwrap_or(self.temp_override.start);
            let end = patch.override_end.unwrap_or(self.temp_override.end);
            update::check_override_window(start, end)?;
        }
        Ok(())
    }

    fn apply(&mut self, patch: &SettingsPatch) {
        if let Some(sps) = &patch.set_points {
            for (sp, p) in self.set_points.iter_mut().zip(sps) {
                sp.apply(p);
            }
        }
        if let Some(days) = &patch.daily_schedules {
            for (d, p) in self.daily_schedules.iter_mut().zip(days) {
                d.apply(p);
            }
        }
        if let Some(w) = patch.weekly_schedule {
            self.weekly = WeeklySchedule::new(w as u16);
        }
        if let Some(t) = patch.temp_override {
            self.temp_override.target = t as f32;
        }
        if let Some(start) = patch.override_start {
            self.temp_override.start = start;
        }
        if let Some(end) = patch.override_end {
            self.temp_override.end = end;
        }
        if !patch.is_empty() {
            info!(
                "settings updated (weekly=0x{:04x}, override {}..{})",
                self.weekly.bits(),
                self.temp_override.start,
                self.temp_override.end
            );
        }
    }
}
