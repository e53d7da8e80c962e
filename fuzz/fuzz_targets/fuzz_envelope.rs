#![no_main]
use levelsave::envelope::{open_level_string, SaveFile};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Classifying and unwrapping arbitrary bytes must never panic
    if let Ok(save) = SaveFile::from_slice(data) {
        for embedded in save.level_strings() {
            let _ = open_level_string(embedded.payload());
        }
        let _ = save.to_bytes();
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = open_level_string(text);
    }
});
