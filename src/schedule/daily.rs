//! Bit-packed 24-hour schedules.
//!
//! A day is 48 half-hour slots, each holding a 2-bit set-point index.
//! Four slots pack into one byte, low bits first:
//!
//! ```text
//!   byte b  (covers hours 2b and 2b+1)
//!   ┌───────┬───────┬───────┬───────┐
//!   │ 7   6 │ 5   4 │ 3   2 │ 1   0 │
//!   └───────┴───────┴───────┴───────┘
//!    odd:30  odd:00  even:30 even:00
//! ```
//!
//! Slot `k = 2*hour + minute/30` lives in byte `k/4` at bit `(k%4)*2`.

use serde::{Deserialize, Serialize};

use super::name::Name;
use super::time::LocalTime;
use crate::error::ValidationError;
use crate::update::{self, SCHEDULE_BYTES, Updatable};

/// Half-hour slots per day.
pub const SLOTS_PER_DAY: usize = 48;

/// A named day template mapping each half hour to a set point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySchedule {
    name: Name,
    #[serde(rename = "schedule")]
    packed: [u8; SCHEDULE_BYTES],
}

impl DailySchedule {
    pub fn new(name: Name, packed: [u8; SCHEDULE_BYTES]) -> Self {
        Self { name, packed }
    }

    /// Pack one set-point index per half hour.  Indices are masked to 2 bits.
    pub fn from_slots(name: Name, slots: &[u8; SLOTS_PER_DAY]) -> Self {
        let mut packed = [0u8; SCHEDULE_BYTES];
        for (k, &sp) in slots.iter().enumerate() {
            packed[k / 4] |= (sp & 0b11) << ((k % 4) * 2);
        }
        Self { name, packed }
    }

    /// Unpack to one set-point index per half hour.
    pub fn slots(&self) -> [u8; SLOTS_PER_DAY] {
        core::array::from_fn(|k| self.slot(k))
    }

    /// Set-point index (0–3) for slot `k` (0–47).  Slots past the end of the
    /// day resolve to 0.
    pub fn slot(&self, k: usize) -> u8 {
        self.packed
            .get(k / 4)
            .map_or(0, |byte| (byte >> ((k % 4) * 2)) & 0b11)
    }

    /// Set-point index (0–3) in effect at `local`.
    pub fn target_index(&self, local: &LocalTime) -> usize {
        debug_assert!(local.hour < 24, "hour out of range: {}", local.hour);
        let byte = self.packed.get(usize::from(local.hour / 2)).copied().unwrap_or(0);
        let bucket = (local.hour % 2) * 2 + u8::from(local.minute >= 30);
        usize::from((byte >> (bucket * 2)) & 0b11)
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn packed(&self) -> &[u8; SCHEDULE_BYTES] {
        &self.packed
    }
}

/// Partial edit of a [`DailySchedule`].
///
/// `schedule` is kept as wide integers so out-of-range bytes are reported
/// as validation failures rather than parse failures.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DailySchedulePatch {
    pub name: Option<String>,
    pub schedule: Option<Vec<i64>>,
}

impl Updatable for DailySchedule {
    type Patch = DailySchedulePatch;

    fn check(&self, patch: &DailySchedulePatch) -> Result<(), ValidationError> {
        if let Some(name) = &patch.name {
            Name::check(name)?;
        }
        if let Some(bytes) = &patch.schedule {
            update::check_schedule_bytes(bytes)?;
        }
        Ok(())
    }

    fn apply(&mut self, patch: &DailySchedulePatch) {
        if let Some(name) = patch.name.as_deref().and_then(Name::truncating) {
            self.name = name;
        }
        if let Some(bytes) = &patch.schedule {
            for (dst, &src) in self.packed.iter_mut().zip(bytes) {
                *dst = src as u8;
            }
        }
    }
}
