//! Dump the objects of a level string for debugging
//!
//! Reads a plaintext or compressed level string from stdin. If starting from
//! an outer save, first extract the level string with the `melt` command.
//!
//! Here is some sample output:
//!
//! ```text
//!     header: kS38=1_40_2_125_3_255
//!     header: kA13=0
//!          0: CubePortal(12) X=50 Y=75
//!          1: MoveTrigger(901) MultiTrigger=true Duration=1.5 TargetGroupId=4
//!          2: Generic(1) X=15 Y=15 [155=1]
//!    skipped: record 1 key 51 ("abc"): did not contain all digits: abc
//!    dropped: record 3: object id 749 does not resolve to a kind
//! ```

use levelsave::envelope::open_level_string;
use levelsave::{Level, PropertyValue, Registry};
use std::io::{self, Read, Write};

fn format_value(value: &PropertyValue) -> String {
    match value {
        PropertyValue::Int(x) => x.to_string(),
        PropertyValue::Short(x) => x.to_string(),
        PropertyValue::Double(x) => x.to_string(),
        PropertyValue::Bool(x) => x.to_string(),
        PropertyValue::Text(x) => format!("{:?}", x),
        PropertyValue::IntArray(xs) => format!("{:?}", xs),
        PropertyValue::Hsv(x) => x.to_string(),
        PropertyValue::Enum(x) => x.to_string(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut data = String::new();
    io::stdin().read_to_string(&mut data)?;
    let text = open_level_string(&data)?;

    let registry = Registry::new();
    let (level, report) = Level::decode(&text, &registry);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (key, value) in level.header.iter() {
        writeln!(out, "{:>10}: {}={}", "header", key, value)?;
    }

    for (i, object) in level.objects.iter().enumerate() {
        write!(out, "{:>10}: {}({})", i, object.kind(), object.id())?;
        for (slot, value) in object.properties() {
            write!(out, " {}={}", slot.property(), format_value(&value))?;
        }

        for (key, raw) in object.extra() {
            write!(out, " [{}={}]", key, raw)?;
        }
        writeln!(out)?;
    }

    for skipped in report.skipped() {
        writeln!(out, "{:>10}: record {} {}", "skipped", skipped.record, skipped.error)?;
    }

    for dropped in report.dropped() {
        writeln!(out, "{:>10}: record {}: {}", "dropped", dropped.record, dropped.error)?;
    }

    Ok(())
}
