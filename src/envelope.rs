//! Detect, unwrap and rewrap the envelopes that level data is stored in.
//!
//! There are two artifacts, each obfuscated in its own way:
//!
//! 1. The outer save - an xml property list that is gzip compressed, base64
//!    encoded and finally XOR'd with a single byte key
//! 2. Level strings - the object records of a single level, gzip compressed
//!    and base64 encoded, stored inside the outer save under the `k4` key
//!
//! ```text
//! save bytes
//! └── XOR(11) → base64 → gzip → xml document
//!     └── <k>k4</k><s>…</s> → base64 → gzip → level string
//!         └── settings record; object record; object record; …
//! ```
//!
//! Either artifact may be encountered in the clear (e.g. exported by a third
//! party tool). Classification is by marker heuristics: an artifact is
//! plaintext only when every one of its markers is present.
//!
//! [`SaveFile`] ties the pieces together for the common read, edit and
//! write back workflow.

mod detect;
mod embed;
mod file;

pub use detect::*;
pub use embed::*;
pub use file::*;
