use crate::registry::{Storage, OBJECT_ID_KEY};
use crate::transform::encode_record_text;
use crate::{LevelObject, PropertyValue};
use std::fmt::Write;

#[cfg(feature = "faster_writer")]
fn write_int<I: itoa::Integer>(out: &mut String, value: I) {
    let mut buf = itoa::Buffer::new();
    out.push_str(buf.format(value));
}

#[cfg(not(feature = "faster_writer"))]
fn write_int<I: std::fmt::Display>(out: &mut String, value: I) {
    let _ = write!(out, "{}", value);
}

fn write_value(out: &mut String, value: &PropertyValue) {
    match value {
        PropertyValue::Int(x) => write_int(out, *x),
        PropertyValue::Short(x) => write_int(out, *x),
        PropertyValue::Double(x) => {
            let _ = write!(out, "{}", x);
        }
        PropertyValue::Bool(x) => out.push(if *x { '1' } else { '0' }),
        PropertyValue::Text(x) => out.push_str(&encode_record_text(x)),
        PropertyValue::IntArray(xs) => {
            for (i, x) in xs.iter().enumerate() {
                if i != 0 {
                    out.push('.');
                }
                write_int(out, *x);
            }
        }
        PropertyValue::Hsv(x) => {
            let _ = write!(out, "{}", x);
        }
        PropertyValue::Enum(x) => write_int(out, x.raw()),
    }
}

/// Writes level objects as object records.
///
/// The object id is always written first, then every property that differs
/// from its default in declaration order, then any undeclared pairs in the
/// order they were read. Records are not terminated.
///
/// ```
/// use levelsave::{LevelObject, ObjectEncoder, ObjectKind};
///
/// let mut portal = LevelObject::new(ObjectKind::CubePortal, 12);
/// portal.set_position(50.0, 75.0);
///
/// let encoder = ObjectEncoder::new();
/// assert_eq!(encoder.encode(&portal), "1,12,2,50,3,75");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectEncoder;

impl ObjectEncoder {
    pub fn new() -> Self {
        ObjectEncoder
    }

    /// Encodes an object into a fresh string
    pub fn encode(&self, object: &LevelObject) -> String {
        let mut out = String::with_capacity(32);
        self.encode_into(object, &mut out);
        out
    }

    /// Appends the encoded object to the output
    pub fn encode_into(&self, object: &LevelObject, out: &mut String) {
        write_int(out, OBJECT_ID_KEY);
        out.push(',');
        write_int(out, object.id());

        for slot in object.descriptor().slots() {
            if object.slot_is_default(slot) {
                continue;
            }

            out.push(',');
            write_int(out, slot.key());
            out.push(',');
            match slot.storage() {
                Storage::Flag(bit) => out.push(if object.flags().get(bit) { '1' } else { '0' }),
                Storage::Value => {
                    if let Some(value) = object.stored(slot) {
                        write_value(out, value);
                    }
                }
            }
        }

        for (key, raw) in object.extra() {
            out.push(',');
            write_int(out, *key);
            out.push(',');
            out.push_str(raw);
        }
    }

    /// Appends every object, each terminated by `;`
    pub fn encode_all<'a>(&self, objects: impl IntoIterator<Item = &'a LevelObject>, out: &mut String) {
        for object in objects {
            self.encode_into(object, out);
            out.push(';');
        }
    }
}
