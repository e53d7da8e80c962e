//! Reversible byte transforms that the save envelopes are built from.
//!
//! Each function is a single stage. The [envelope](crate::envelope) module
//! composes them in the order each artifact requires.

use crate::{Artifact, Error};
use base64::{
    alphabet,
    engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD},
    engine::DecodePaddingMode,
    Engine,
};
use flate2::{read::GzDecoder, write::GzEncoder, Compression, GzBuilder};
use std::io::{Read, Write};

/// Size of the buffer that gzip streams are pumped through
const BUFFER_SIZE: usize = 16 * 1024;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// XOR every byte with a single byte key. Applying it twice with the same key
/// is the identity.
///
/// ```
/// use levelsave::transform::xor;
/// let data = b"hello";
/// assert_eq!(xor(&xor(data, 11), 11), data);
/// ```
pub fn xor(data: &[u8], key: u8) -> Vec<u8> {
    data.iter().map(|x| x ^ key).collect()
}

/// XOR every byte with a single byte key without allocating
pub fn xor_in_place(data: &mut [u8], key: u8) {
    for x in data.iter_mut() {
        *x ^= key;
    }
}

/// Rewrites url safe base64 into the standard alphabet: `-` and `_` become
/// `+` and `/`, NUL bytes are dropped and the padding is recomputed so that
/// already padded and unpadded input are treated alike.
///
/// ```
/// use levelsave::transform::normalize_base64_url;
/// assert_eq!(normalize_base64_url("a-_"), "a+/=");
/// assert_eq!(normalize_base64_url("a-_="), "a+/=");
/// assert_eq!(normalize_base64_url("ab\0cd"), "abcd");
/// ```
pub fn normalize_base64_url(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + 3);
    for c in text.chars() {
        match c {
            '-' => result.push('+'),
            '_' => result.push('/'),
            '\0' | '=' => {}
            c => result.push(c),
        }
    }

    while result.len() % 4 != 0 {
        result.push('=');
    }

    result
}

/// Rewrites standard base64 into the url safe alphabet. Padding is kept.
pub fn restore_base64_url(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '+' => result.push('-'),
            '/' => result.push('_'),
            '\0' => {}
            c => result.push(c),
        }
    }

    result
}

/// Decodes url safe (or standard) base64, with or without padding
pub fn base64_url_decode(text: &str) -> Result<Vec<u8>, Error> {
    let normalized = normalize_base64_url(text.trim());
    STANDARD
        .decode(normalized.as_bytes())
        .map_err(|_| Error::format_mismatch(Artifact::Base64, "invalid base64 payload"))
}

/// Encodes bytes as padded url safe base64
pub fn base64_url_encode(data: &[u8]) -> String {
    restore_base64_url(&STANDARD.encode(data))
}

/// Engine for text embedded inside object records: url safe alphabet, padded
/// on output and padding optional on input
const TEXT_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encodes text the way it is stored inside an object record
pub(crate) fn encode_record_text(text: &str) -> String {
    TEXT_ENGINE.encode(text.as_bytes())
}

/// Decodes text stored inside an object record. Returns `None` when the data
/// is not url safe base64 or doesn't decode to utf-8.
pub(crate) fn decode_record_text(data: &str) -> Option<String> {
    let bytes = TEXT_ENGINE.decode(data.trim().trim_end_matches('\0')).ok()?;
    String::from_utf8(bytes).ok()
}

/// Returns true if the data starts with the gzip magic bytes
pub fn is_gzip(data: &[u8]) -> bool {
    data.starts_with(&GZIP_MAGIC)
}

/// Compresses data into a single gzip member with a zeroed modification time
/// and the default compression level
pub fn gzip_compress(data: &[u8]) -> Result<Vec<u8>, Error> {
    let sink = Vec::with_capacity(data.len() / 2 + 32);
    let mut encoder: GzEncoder<Vec<u8>> = GzBuilder::new()
        .mtime(0)
        .write(sink, Compression::default());

    for chunk in data.chunks(BUFFER_SIZE) {
        encoder.write_all(chunk)?;
    }

    Ok(encoder.finish()?)
}

/// Decompresses a gzip stream.
///
/// Input without the gzip magic, or a stream that is corrupt or truncated,
/// is reported as a format mismatch.
///
/// ```
/// use levelsave::transform::{gzip_compress, gzip_decompress};
/// let packed = gzip_compress(b"1,1,2,15,3,15;").unwrap();
/// assert_eq!(gzip_decompress(&packed).unwrap(), b"1,1,2,15,3,15;");
/// assert!(gzip_decompress(b"1,1,2,15").unwrap_err().is_format_mismatch());
/// ```
pub fn gzip_decompress(data: &[u8]) -> Result<Vec<u8>, Error> {
    if !is_gzip(data) {
        return Err(Error::format_mismatch(Artifact::Gzip, "missing gzip magic"));
    }

    let mut decoder = GzDecoder::new(data);
    let mut result = Vec::with_capacity(data.len() * 4);
    let mut buf = vec![0u8; BUFFER_SIZE];
    loop {
        match decoder.read(&mut buf) {
            Ok(0) => break,
            Ok(read) => result.extend_from_slice(&buf[..read]),
            Err(ref e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(_) => {
                return Err(Error::format_mismatch(
                    Artifact::Gzip,
                    "corrupt gzip stream",
                ))
            }
        }
    }

    Ok(result)
}
