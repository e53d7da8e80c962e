//! Writes the plaintext form of a save or level string read from stdin.
//!
//! Outer saves are written as their xml document. Level strings are written
//! as their object records.

use levelsave::envelope::{open_level_string, SaveFile};
use std::error;
use std::io::{self, Read, Write};

fn main() -> Result<(), Box<dyn error::Error>> {
    let mut data = Vec::new();
    io::stdin().read_to_end(&mut data)?;

    let stdout = io::stdout();
    let mut lock = stdout.lock();

    match SaveFile::from_slice(&data) {
        Ok(save) => lock.write_all(save.document().as_bytes())?,
        Err(e) if e.is_format_mismatch() => {
            let text = std::str::from_utf8(&data)?;
            let records = open_level_string(text)?;
            lock.write_all(records.as_bytes())?;
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
