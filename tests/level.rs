use levelsave::{
    ErrorKind, FailedPropertyStrategy, Level, LevelObject, LevelObjectCollection, ObjectDecoder,
    ObjectEncoder, ObjectKind, Property, PropertyValue, Registry,
};
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use rstest::*;

#[fixture]
fn registry() -> Registry {
    Registry::new()
}

/// Level strings built from realistic object ids, keys and raw values with a
/// sprinkling of garbage the decoder has to skip over
#[derive(Debug, Clone)]
struct LevelText(String);

const IDS: &[i32] = &[
    1, 8, 12, 13, 10, 36, 85, 747, 749, 901, 899, 914, 1006, 1268, 1275, 1595, 1611, 1811, 1816,
];

const KEYS: &[u32] = &[
    2, 3, 4, 5, 6, 7, 10, 13, 20, 21, 24, 25, 28, 29, 30, 31, 32, 43, 51, 54, 57, 62, 80, 87, 97,
    99, 108, 155,
];

fn raw_value(g: &mut Gen) -> String {
    match u8::arbitrary(g) % 9 {
        0 => i16::arbitrary(g).to_string(),
        1 => (f64::from(i16::arbitrary(g)) / 4.0).to_string(),
        2 => String::from(*g.choose(&["0", "1"]).unwrap()),
        3 => {
            let ids: Vec<String> = (0..u8::arbitrary(g) % 4)
                .map(|_| (u16::arbitrary(g) % 999 + 1).to_string())
                .collect();
            ids.join(".")
        }
        4 => format!(
            "{}a{}a{}a{}a{}",
            i16::arbitrary(g) % 180,
            u8::arbitrary(g) % 3,
            f64::from(u8::arbitrary(g) % 8) / 4.0,
            u8::arbitrary(g) % 2,
            u8::arbitrary(g) % 2
        ),
        5 => String::from(*g.choose(&["SGkhPw==", "SGkhPw", "aGVsbG8"]).unwrap()),
        6 => String::from(*g.choose(&["abc", "", "1e", "-"]).unwrap()),
        7 => (u8::arbitrary(g) % 30).to_string(),
        _ => u32::arbitrary(g).to_string(),
    }
}

impl Arbitrary for LevelText {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut out = String::new();
        if bool::arbitrary(g) {
            out.push_str("kS38,1_40_2_125_3_255,kA13,0;");
        }

        for _ in 0..usize::arbitrary(g) % 8 {
            out.push_str("1,");
            out.push_str(&g.choose(IDS).unwrap().to_string());
            for _ in 0..usize::arbitrary(g) % 6 {
                out.push(',');
                out.push_str(&g.choose(KEYS).unwrap().to_string());
                out.push(',');
                out.push_str(&raw_value(g));
            }
            out.push(';');
        }

        LevelText(out)
    }
}

#[quickcheck]
fn reencoding_is_stable(text: LevelText) -> bool {
    let registry = Registry::new();
    let (first, _) = Level::decode(&text.0, &registry);
    let (second, report) = Level::decode(&first.encode(), &registry);
    report.is_clean() && first == second
}

#[quickcheck]
fn parallel_decode_matches(text: LevelText, threads: u8) -> bool {
    let registry = Registry::new();
    let decoder = ObjectDecoder::new(&registry);
    let (_, body) = text.0.split_once("kA13,0;").unwrap_or(("", text.0.as_str()));
    let (sequential, report) = decoder.decode_all(body).unwrap();
    let (parallel, parallel_report) = decoder
        .decode_parallel(body, usize::from(threads % 8) + 1)
        .unwrap();

    sequential == parallel
        && report.skipped() == parallel_report.skipped()
        && report.dropped().len() == parallel_report.dropped().len()
}

#[rstest]
fn fresh_objects_encode_only_their_id(registry: Registry) {
    let encoder = ObjectEncoder::new();
    for kind in ObjectKind::ALL {
        let Some(id) = kind.descriptor().default_object_id() else {
            let object = LevelObject::new(*kind, 85);
            assert_eq!(encoder.encode(&object), "1,85", "{}", kind);
            continue;
        };

        let object = LevelObject::new(*kind, id);
        assert_eq!(encoder.encode(&object), format!("1,{}", id), "{}", kind);

        let instantiated = registry.instantiate(id).unwrap();
        assert_eq!(instantiated.kind(), *kind);
        assert_eq!(encoder.encode(&instantiated), format!("1,{}", id));
    }
}

#[rstest]
fn shared_keys_resolve_per_kind(registry: Registry) {
    let (objects, report) = LevelObjectCollection::decode_all("1,1275,80,7;1,1816,80,7;", &registry);
    assert!(report.is_clean());

    let pickup = &objects[0];
    assert_eq!(pickup.kind(), ObjectKind::PickupItem);
    assert_eq!(pickup.get(Property::ItemId), Some(PropertyValue::Short(7)));
    assert_eq!(pickup.get(Property::BlockId), None);

    let block = &objects[1];
    assert_eq!(block.kind(), ObjectKind::CollisionBlock);
    assert_eq!(block.get(Property::BlockId), Some(PropertyValue::Short(7)));
    assert_eq!(block.get(Property::ItemId), None);

    // Writing one slot leaves the other kind's interpretation untouched
    let mut objects = objects;
    objects.set_property(&[1], Property::BlockId, 9i16.into()).unwrap();
    assert_eq!(objects[0].get(Property::ItemId), Some(PropertyValue::Short(7)));
    assert_eq!(objects.encode_all(), "1,1275,80,7;1,1816,80,9;");
}

#[rstest]
fn cube_portal_record(registry: Registry) {
    let decoder = ObjectDecoder::new(&registry);
    let decoded = decoder.decode("1,12,2,50,3,75").unwrap();
    assert!(decoded.skipped.is_empty());
    assert_eq!(decoded.object.kind(), ObjectKind::CubePortal);
    assert_eq!(decoded.object.get(Property::X), Some(PropertyValue::Double(50.0)));
    assert_eq!(decoded.object.get(Property::Y), Some(PropertyValue::Double(75.0)));
    assert_eq!(ObjectEncoder::new().encode(&decoded.object), "1,12,2,50,3,75");
}

#[rstest]
fn group_ids_record(registry: Registry) {
    let decoder = ObjectDecoder::new(&registry);
    let decoded = decoder.decode("1,1,57,5.10.15").unwrap();
    assert_eq!(
        decoded.object.get(Property::GroupIds),
        Some(PropertyValue::IntArray(vec![5, 10, 15]))
    );
    assert_eq!(decoded.object.group_ids(), &[5, 10, 15]);
    assert!(ObjectEncoder::new()
        .encode(&decoded.object)
        .contains("57,5.10.15,"));
}

#[rstest]
fn bad_int_skips_one_property(registry: Registry) {
    let (objects, report) =
        LevelObjectCollection::decode_all("1,901,2,15,51,abc,28,30;1,1,2,45;", &registry);

    assert_eq!(objects.len(), 2);
    assert_eq!(report.skipped().len(), 1);
    assert!(report.dropped().is_empty());

    let skipped = &report.skipped()[0];
    assert_eq!(skipped.record, 0);
    assert_eq!(skipped.error.key(), 51);
    assert_eq!(skipped.error.raw(), "abc");

    let mover = &objects[0];
    assert_eq!(mover.x(), 15.0);
    assert_eq!(mover.get(Property::TargetGroupId), Some(PropertyValue::Short(0)));
    assert_eq!(mover.get(Property::MoveOffsetX), Some(PropertyValue::Int(30)));
    assert_eq!(objects[1].x(), 45.0);
}

#[rstest]
fn bad_int_with_error_strategy(registry: Registry) {
    let decoder = ObjectDecoder::builder()
        .on_failed_property(FailedPropertyStrategy::Error)
        .build(&registry);
    let err = decoder.decode_all("1,901,51,abc;").unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::PropertyParse(e) if e.key() == 51));
}

#[rstest]
fn unresolvable_records_are_dropped(registry: Registry) {
    let (objects, report) = LevelObjectCollection::decode_all("1,749,2,15;2,30;1,1;", &registry);
    assert_eq!(objects.len(), 1);
    assert_eq!(report.dropped().len(), 2);
    assert!(matches!(
        report.dropped()[0].error.kind(),
        ErrorKind::UnresolvableObjectKind { object_id: 749 }
    ));
    assert!(matches!(report.dropped()[1].error.kind(), ErrorKind::MissingObjectId));
}

#[rstest]
fn unknown_keys_and_enums_survive(registry: Registry) {
    let text = "kS38,1_40,kA13,0;1,901,87,1,30,99,155,1,999,hello;";
    let (level, report) = Level::decode(text, &registry);
    assert!(report.is_clean());
    let mover = &level.objects[0];
    let easing = mover.get(Property::Easing).unwrap();
    assert_eq!(easing.as_enum().map(|x| x.raw()), Some(99));
    assert!(!easing.as_enum().unwrap().is_known());
    assert_eq!(mover.extra(), &[(155, String::from("1")), (999, String::from("hello"))]);
    assert_eq!(level.encode(), text);
}
