//! Wall-clock types handed to the schedule resolver.
//!
//! The engine never does timezone or DST arithmetic itself.  A clock
//! adapter turns an epoch timestamp into a [`LocalTime`] and the resolver
//! only reads its fields.

use core::fmt::Write;

/// Broken-down local time as delivered by the clock collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTime {
    pub year: i32,
    /// 1–12
    pub month: u8,
    /// 1–31
    pub day: u8,
    /// 0–6, Sunday = 0.
    pub weekday: u8,
    /// 0–23
    pub hour: u8,
    /// 0–59
    pub minute: u8,
    /// 0–59 (60 on a leap second)
    pub second: u8,
    /// Offset of local time from UTC in seconds (east positive).
    pub utc_offset_secs: i32,
}

/// Capacity of an ISO 8601 rendering: `YYYY-MM-DDTHH:MM:SS+HH:MM` plus
/// headroom for a five-digit or negative year.
pub const ISO8601_CAPACITY: usize = 32;

impl LocalTime {
    /// Render as `YYYY-MM-DDTHH:MM:SS±HH:MM`.
    pub fn to_iso8601(&self) -> heapless::String<ISO8601_CAPACITY> {
        let sign = if self.utc_offset_secs < 0 { '-' } else { '+' };
        let offset = self.utc_offset_secs.unsigned_abs();
        let mut s = heapless::String::new();
        // Year `i32::MIN` with an offset under 100 h fills all 32 bytes.
        let _ = write!(
            s,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}{}{:02}:{:02}",
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            sign,
            offset / 3600,
            (offset % 3600) / 60,
        );
        s
    }

    /// Index of the 30-minute slot this time falls in (0–47).
    pub fn half_hour_slot(&self) -> usize {
        usize::from(self.hour) * 2 + usize::from(self.minute >= 30)
    }
}

/// A single instant seen both ways: UTC seconds for override windows and
/// local wall-clock fields for schedule lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moment {
    /// Seconds since the Unix epoch, UTC.
    pub timestamp: i64,
    pub local: LocalTime,
}

impl Moment {
    pub fn new(timestamp: i64, local: LocalTime) -> Self {
        Self { timestamp, local }
    }
}
