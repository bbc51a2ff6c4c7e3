//! Fuzz target: weekly + daily schedule lookup
//!
//! Builds a store from 12 packed schedule bytes and a weekly word, then
//! resolves a target for an arbitrary local time.
//!
//! Invariants checked:
//! - No panics for any packed bytes, weekly word or valid local time
//! - The resolved target is always one of the four set points
//!
//! cargo fuzz run fuzz_schedule_lookup

#![no_main]

use libfuzzer_sys::fuzz_target;
use thermite::schedule::{LocalTime, Moment};
use thermite::settings::{SettingsPatch, SettingsStore};
use thermite::update::Updatable;

fuzz_target!(|data: &[u8]| {
    if data.len() < 17 {
        return;
    }
    let (packed, rest) = data.split_at(12);
    let weekly = i64::from(u16::from_le_bytes([rest[0], rest[1]]) & 0x3FFF);

    let day = thermite::schedule::DailySchedulePatch {
        name: None,
        schedule: Some(packed.iter().map(|&b| i64::from(b)).collect()),
    };
    let patch = SettingsPatch {
        daily_schedules: Some(vec![day.clone(), day.clone(), day.clone(), day]),
        weekly_schedule: Some(weekly),
        ..SettingsPatch::default()
    };

    let mut store = SettingsStore::default();
    store.update_safe(&patch).expect("in-range schedule must be accepted");

    let local = LocalTime {
        year: 2021,
        month: 1,
        day: 1,
        weekday: rest[2] % 7,
        hour: rest[3] % 24,
        minute: rest[4] % 60,
        second: 0,
        utc_offset_secs: 0,
    };
    let target = store.resolve_target(&Moment::new(0, local));
    assert!(store.set_points().iter().any(|sp| sp.target() == target));
});
