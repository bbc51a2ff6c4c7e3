//! Fuzz target: `Sampler::poll` under arbitrary monotonic timestamps
//!
//! Interprets the input as a sequence of little-endian `u32` tick times,
//! including backwards jumps that look like counter wraparound.
//!
//! Invariants checked:
//! - No panics (no subtraction overflow) for any sequence
//! - A backwards step is always `Resync` and never `Request`
//! - `Read` only happens after the conversion delay has elapsed
//!
//! cargo fuzz run fuzz_sampler_clock

#![no_main]

use libfuzzer_sys::fuzz_target;
use thermite::control::{SampleAction, Sampler};

const DELAY_MS: u32 = 375;

fuzz_target!(|data: &[u8]| {
    let mut sampler = Sampler::new(60_000, DELAY_MS);

    for chunk in data.chunks_exact(4) {
        let now = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        let last = sampler.last_requested_at();
        let action = sampler.poll(now);

        match last {
            Some(last) if now < last => {
                assert_eq!(action, SampleAction::Resync);
                assert_eq!(sampler.last_requested_at(), Some(now));
            }
            Some(last) => {
                assert_ne!(action, SampleAction::Resync);
                if action == SampleAction::Read {
                    assert!(now - last > DELAY_MS);
                }
            }
            None => assert_eq!(action, SampleAction::Request),
        }
    }
});
