//! Validate-then-apply contract for user edits.
//!
//! ```text
//!   patch ──▶ check() ──Err──▶ rejected, nothing touched
//!                │
//!                Ok
//!                ▼
//!             apply() ──▶ entity mutated
//! ```
//!
//! Every editable entity implements [`Updatable`].  A patch is a partial
//! document: each field is optional and an absent field is always valid.
//! `check` never mutates, so a composite entity can check every child
//! before applying anything, which makes a rejected update atomic.
//!
//! The free functions below hold the field rules shared by the entities.

use crate::error::ValidationError;

/// Lowest accepted target temperature (°C).
pub const TEMP_MIN_C: f64 = 10.0;
/// Highest accepted target temperature (°C).
pub const TEMP_MAX_C: f64 = 30.0;
/// Packed bytes in a daily schedule.
pub const SCHEDULE_BYTES: usize = 12;
/// Largest valid weekly assignment word (7 days x 2 bits).
pub const WEEKLY_MAX: i64 = 0x3FFF;

/// An entity that can be edited through a partial patch.
pub trait Updatable {
    type Patch;

    /// Report the first rule `patch` breaks against the current state.
    fn check(&self, patch: &Self::Patch) -> Result<(), ValidationError>;

    /// Assign every present field of `patch`.
    ///
    /// Callers are expected to have checked the patch first; applying an
    /// unchecked patch still keeps the entity's own invariants where it can
    /// (e.g. names are truncated rather than overflowing).
    fn apply(&mut self, patch: &Self::Patch);

    /// Boolean projection of [`check`](Self::check).
    fn validate(&self, patch: &Self::Patch) -> bool {
        self.check(patch).is_ok()
    }

    /// Check, and apply only if the whole patch is valid.
    fn update_safe(&mut self, patch: &Self::Patch) -> Result<(), ValidationError> {
        self.check(patch)?;
        self.apply(patch);
        Ok(())
    }
}

// ── Field rules ───────────────────────────────────────────────

pub fn check_temperature(celsius: f64) -> Result<(), ValidationError> {
    if (TEMP_MIN_C..=TEMP_MAX_C).contains(&celsius) {
        Ok(())
    } else {
        Err(ValidationError::TemperatureOutOfRange)
    }
}

pub fn check_schedule_bytes(bytes: &[i64]) -> Result<(), ValidationError> {
    if bytes.len() != SCHEDULE_BYTES {
        return Err(ValidationError::ScheduleLength(bytes.len()));
    }
    if bytes.iter().any(|b| !(0..=255).contains(b)) {
        return Err(ValidationError::ScheduleByteOutOfRange);
    }
    Ok(())
}

pub fn check_weekly(value: i64) -> Result<(), ValidationError> {
    if (0..=WEEKLY_MAX).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::WeeklyScheduleOutOfRange)
    }
}

/// An override window is either fully unset (`0, 0`) or a non-negative,
/// non-inverted pair of timestamps.
pub fn check_override_window(start: i64, end: i64) -> Result<(), ValidationError> {
    if start < 0 || end < 0 {
        return Err(ValidationError::OverrideNegative);
    }
    if (start == 0) != (end == 0) {
        return Err(ValidationError::OverrideHalfSet);
    }
    if start > end {
        return Err(ValidationError::OverrideInverted);
    }
    Ok(())
}

/// Fixed-size collections in a patch must carry exactly four entries.
pub fn check_count<T>(field: &'static str, items: &[T]) -> Result<(), ValidationError> {
    if items.len() == 4 {
        Ok(())
    } else {
        Err(ValidationError::WrongCount {
            field,
            len: items.len(),
        })
    }
}
