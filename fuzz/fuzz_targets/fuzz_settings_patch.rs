//! Fuzz target: `SettingsPatch::from_json` + `SettingsStore::update_safe`
//!
//! Feeds arbitrary bytes through the user-settings PUT path.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - A rejected patch leaves the serialized document byte-identical
//! - An accepted patch leaves a document that parses back as a valid patch
//!
//! cargo fuzz run fuzz_settings_patch

#![no_main]

use libfuzzer_sys::fuzz_target;
use thermite::settings::{SettingsPatch, SettingsStore};
use thermite::update::Updatable;

fuzz_target!(|data: &[u8]| {
    let Ok(body) = core::str::from_utf8(data) else {
        return;
    };

    let mut store = SettingsStore::default();
    let before = store.to_document().to_json();

    let Ok(patch) = SettingsPatch::from_json(body) else {
        return;
    };

    match store.update_safe(&patch) {
        Ok(()) => {
            let after = store.to_document().to_json();
            let reparsed = SettingsPatch::from_json(&after).expect("document must reparse");
            assert!(
                store.validate(&reparsed),
                "stored document must validate against itself: {after}"
            );
        }
        Err(_) => {
            assert_eq!(store.to_document().to_json(), before, "rejected patch mutated store");
        }
    }
});
