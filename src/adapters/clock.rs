//! Host clock adapter.
//!
//! - Monotonic time comes from `std::time::Instant`, truncated to a `u32`
//!   millisecond counter that wraps like a microcontroller tick counter.
//! - Wall-clock time comes from the system clock via `chrono`, converted to
//!   any `chrono` time zone (the machine's local zone by default).

use std::time::Instant;

use chrono::{DateTime, Datelike, Local, Offset, TimeZone, Timelike, Utc};

use crate::app::ports::ClockPort;
use crate::schedule::LocalTime;

/// Anything before 2020-01-01 is treated as an unsynced clock.
const EPOCH_2020: i64 = 1_577_836_800;

/// Break a `chrono` date-time down into the fields the resolver reads.
pub fn local_time_of<Tz: TimeZone>(dt: &DateTime<Tz>) -> LocalTime {
    LocalTime {
        year: dt.year(),
        month: dt.month() as u8,
        day: dt.day() as u8,
        weekday: dt.weekday().num_days_from_sunday() as u8,
        hour: dt.hour() as u8,
        minute: dt.minute() as u8,
        second: dt.second() as u8,
        utc_offset_secs: dt.offset().fix().local_minus_utc(),
    }
}

/// System clock in time zone `Tz`.
pub struct SystemClock<Tz: TimeZone> {
    tz: Tz,
    boot: Instant,
    monotonic_offset_ms: u32,
}

impl SystemClock<Local> {
    /// Clock in the machine's local time zone.
    pub fn local() -> Self {
        Self::with_timezone(Local)
    }
}

impl<Tz: TimeZone> SystemClock<Tz> {
    pub fn with_timezone(tz: Tz) -> Self {
        Self {
            tz,
            boot: Instant::now(),
            monotonic_offset_ms: 0,
        }
    }

    /// Start the monotonic counter at `offset_ms` instead of zero, e.g. just
    /// short of `u32::MAX` to exercise wraparound.
    pub fn with_monotonic_offset(mut self, offset_ms: u32) -> Self {
        self.monotonic_offset_ms = offset_ms;
        self
    }
}

impl<Tz: TimeZone> ClockPort for SystemClock<Tz> {
    fn monotonic_ms(&self) -> u32 {
        (self.boot.elapsed().as_millis() as u32).wrapping_add(self.monotonic_offset_ms)
    }

    fn now_utc(&mut self) -> Option<i64> {
        let ts = Utc::now().timestamp();
        (ts >= EPOCH_2020).then_some(ts)
    }

    fn to_local(&self, timestamp: i64) -> LocalTime {
        let utc = DateTime::from_timestamp(timestamp, 0).unwrap_or_default();
        local_time_of(&utc.with_timezone(&self.tz))
    }
}
