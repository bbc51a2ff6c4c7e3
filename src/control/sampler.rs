//! Non-blocking sensor sampling schedule.
//!
//! ```text
//!            interval elapsed / never requested
//!   ┌──────────────────────────────────────────────┐
//!   ▼                                              │
//! Request ──▶ Wait ──(delay elapsed)──▶ Read ──────┘
//!   ▲
//!   └── now < last (counter wrapped): Resync, re-anchor, no request
//! ```
//!
//! Timestamps are a `u32` millisecond counter that wraps roughly every
//! 49.7 days.  A tick whose timestamp is below the last request time is
//! treated as a wrap: the anchor moves to `now` and the next request
//! happens one interval later than it otherwise would.

/// What the control loop should do with the sensor this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleAction {
    /// Start a new conversion.
    Request,
    /// The last conversion has had time to finish; read it.
    Read,
    /// The counter wrapped; nothing to do this tick.
    Resync,
    /// Conversion still in progress.
    Wait,
}

/// Tracks when the last conversion was requested.
#[derive(Debug, Clone)]
pub struct Sampler {
    last_requested_at: Option<u32>,
    request_interval_ms: u32,
    conversion_delay_ms: u32,
}

impl Sampler {
    pub fn new(request_interval_ms: u32, conversion_delay_ms: u32) -> Self {
        Self {
            last_requested_at: None,
            request_interval_ms,
            conversion_delay_ms,
        }
    }

    /// Decide the action for a tick at `now_ms` and update the anchor.
    pub fn poll(&mut self, now_ms: u32) -> SampleAction {
        let Some(last) = self.last_requested_at else {
            self.last_requested_at = Some(now_ms);
            return SampleAction::Request;
        };

        if now_ms < last {
            self.last_requested_at = Some(now_ms);
            return SampleAction::Resync;
        }

        let elapsed = now_ms - last;
        if elapsed > self.request_interval_ms {
            self.last_requested_at = Some(now_ms);
            SampleAction::Request
        } else if elapsed > self.conversion_delay_ms {
            SampleAction::Read
        } else {
            SampleAction::Wait
        }
    }

    pub fn last_requested_at(&self) -> Option<u32> {
        self.last_requested_at
    }
}
