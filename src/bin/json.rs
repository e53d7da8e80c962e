//! Converts a level string read from stdin into JSON
//!
//! The level string may be plaintext or compressed.

use levelsave::envelope::open_level_string;
use levelsave::{Level, Registry};
use std::io::{self, Read};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut data = String::new();
    io::stdin().read_to_string(&mut data)?;
    let text = open_level_string(&data)?;

    let registry = Registry::new();
    let (level, report) = Level::decode(&text, &registry);

    let header: serde_json::Map<String, serde_json::Value> = level
        .header
        .iter()
        .map(|(k, v)| (k.to_owned(), serde_json::Value::from(v)))
        .collect();

    let doc = serde_json::json!({
        "header": header,
        "objects": level.objects,
        "skipped": report.skipped().len(),
        "dropped": report.dropped().len(),
    });

    let stdout = io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), &doc)?;
    Ok(())
}
