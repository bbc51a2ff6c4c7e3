//! Bounded display names for set points and daily schedules.

use serde::Serialize;

use crate::error::ValidationError;

/// Maximum name length in bytes.
pub const NAME_MAX_LEN: usize = 15;

/// A non-empty UTF-8 label of at most [`NAME_MAX_LEN`] bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Name(heapless::String<NAME_MAX_LEN>);

impl Name {
    /// Check a candidate name without building one.
    pub fn check(s: &str) -> Result<(), ValidationError> {
        if s.is_empty() {
            Err(ValidationError::NameEmpty)
        } else if s.len() > NAME_MAX_LEN {
            Err(ValidationError::NameTooLong)
        } else {
            Ok(())
        }
    }

    /// Build a name, cutting it at the last character boundary that fits.
    ///
    /// Returns `None` for an empty input.
    pub fn truncating(s: &str) -> Option<Self> {
        let mut end = s.len().min(NAME_MAX_LEN);
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        if end == 0 {
            return None;
        }
        let mut inner = heapless::String::new();
        // `end` never exceeds capacity.
        let _ = inner.push_str(&s[..end]);
        Some(Self(inner))
    }

    /// Built-in label.  Must be a non-empty literal; anything past 15 bytes
    /// is dropped.
    pub(crate) fn fixed(label: &'static str) -> Self {
        debug_assert!(!label.is_empty());
        let mut inner = heapless::String::new();
        for c in label.chars() {
            if inner.push(c).is_err() {
                break;
            }
        }
        Self(inner)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<&str> for Name {
    type Error = ValidationError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::check(s)?;
        Self::truncating(s).ok_or(ValidationError::NameEmpty)
    }
}

impl core::fmt::Display for Name {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
