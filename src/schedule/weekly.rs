//! Weekday → daily schedule assignment, packed into 14 bits.

use super::time::LocalTime;

/// Two bits per weekday, Sunday in bits `[1:0]` through Saturday in
/// bits `[13:12]`; each field selects one of the four daily schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklySchedule(u16);

impl WeeklySchedule {
    /// Highest bit pattern that still leaves the two top bits clear.
    pub const MAX: u16 = 0x3FFF;

    /// Wrap a raw word, clearing the unused top bits.
    pub const fn new(bits: u16) -> Self {
        Self(bits & Self::MAX)
    }

    /// Build from one daily-schedule index per weekday (Sunday first).
    pub fn from_days(days: [u8; 7]) -> Self {
        let bits = days
            .iter()
            .enumerate()
            .fold(0u16, |acc, (wd, &d)| acc | (u16::from(d & 0b11) << (wd * 2)));
        Self(bits)
    }

    pub fn days(&self) -> [u8; 7] {
        core::array::from_fn(|wd| ((self.0 >> (wd * 2)) & 0b11) as u8)
    }

    /// Daily schedule index (0–3) for `local`'s weekday.
    pub fn daily_schedule_index(&self, local: &LocalTime) -> usize {
        debug_assert!(local.weekday < 7, "weekday out of range: {}", local.weekday);
        let shift = u32::from(local.weekday) * 2;
        usize::from(self.0.checked_shr(shift).unwrap_or(0) & 0b11)
    }

    pub const fn bits(&self) -> u16 {
        self.0
    }
}
