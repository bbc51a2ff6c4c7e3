//! Temporary hold ("vacation") that pre-empts the weekly schedule.

/// A fixed target held over a UTC time window.
///
/// `start == end == 0` means no override is configured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Override {
    pub target: f32,
    /// UTC epoch seconds, inclusive.
    pub start: i64,
    /// UTC epoch seconds, exclusive.
    pub end: i64,
}

impl Override {
    /// An unset override holding `target` for when it is next enabled.
    pub const fn inactive(target: f32) -> Self {
        Self {
            target,
            start: 0,
            end: 0,
        }
    }

    /// Whether a window has been configured at all.
    pub fn is_set(&self) -> bool {
        self.start != 0 || self.end != 0
    }

    /// Whether the override governs the target at `timestamp`.
    pub fn is_active(&self, timestamp: i64) -> bool {
        self.is_set() && self.start <= timestamp && timestamp < self.end
    }
}
