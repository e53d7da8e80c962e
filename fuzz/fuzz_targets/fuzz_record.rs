#![no_main]
use levelsave::{LevelObjectCollection, Registry};
use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

static REGISTRY: OnceLock<Registry> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let registry = REGISTRY.get_or_init(Registry::new);
    let (objects, _) = LevelObjectCollection::decode_all(text, registry);

    // Whatever decodes must survive an encode and decode cycle unchanged
    let encoded = objects.encode_all();
    let (again, report) = LevelObjectCollection::decode_all(&encoded, registry);
    assert!(report.is_clean());
    assert_eq!(objects, again);
});
