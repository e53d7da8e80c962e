use crate::transform::{
    base64_url_decode, base64_url_encode, gzip_compress, gzip_decompress, xor, xor_in_place,
};
use crate::{Artifact, Error};
use std::borrow::Cow;

/// The key the outer save is XOR'd with
pub const SAVE_XOR_KEY: u8 = 11;

/// Every compressed level string starts with this: the base64 of a gzip
/// header with no flags and a zeroed modification time
pub const LEVEL_STRING_MAGIC: &str = "H4sIAAAAAAAA";

/// The declaration every decoded save document starts with
pub const XML_DECLARATION: &str = r#"<?xml version="1.0"?>"#;

const SAVE_MARKERS: [&str; 5] = [XML_DECLARATION, "<plist", r#"gjver="2.0""#, "<dict>", "</plist>"];

const LEVEL_STRING_MARKERS: [&str; 5] = ["kA13,", "kA15,", "kA16,", "kA14,", "kA6,"];

/// Whether an artifact is stored in the clear or obfuscated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    Plaintext,
    Obfuscated,
}

impl SaveState {
    pub fn is_plaintext(&self) -> bool {
        matches!(self, SaveState::Plaintext)
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

fn classify(data: &[u8], markers: &[&str]) -> SaveState {
    let found = markers
        .iter()
        .filter(|marker| contains(data, marker.as_bytes()))
        .count();

    log::trace!("found {} of {} plaintext markers", found, markers.len());
    if found == markers.len() {
        SaveState::Plaintext
    } else {
        SaveState::Obfuscated
    }
}

/// Classifies an outer save. It is plaintext only if every plaintext marker
/// is present.
///
/// ```
/// use levelsave::envelope::{classify_save, SaveState};
///
/// let doc = r#"<?xml version="1.0"?><plist version="1.0" gjver="2.0"><dict></dict></plist>"#;
/// assert_eq!(classify_save(doc.as_bytes()), SaveState::Plaintext);
/// assert_eq!(classify_save(b"C?xBJJJJJJJJ"), SaveState::Obfuscated);
/// ```
pub fn classify_save(blob: &[u8]) -> SaveState {
    classify(blob, &SAVE_MARKERS)
}

/// Classifies a level string. It is plaintext only if every level settings
/// marker is present.
pub fn classify_level_string(text: &str) -> SaveState {
    classify(text.as_bytes(), &LEVEL_STRING_MARKERS)
}

/// Returns true if the text carries the xml declaration of a save document
pub fn is_xml_document(text: &str) -> bool {
    text.contains(XML_DECLARATION)
}

/// Recovers the xml document of an obfuscated outer save
pub fn decrypt_save(blob: &[u8]) -> Result<String, Error> {
    let mut data = blob.to_vec();
    xor_in_place(&mut data, SAVE_XOR_KEY);

    let text = std::str::from_utf8(&data)
        .map_err(|_| Error::format_mismatch(Artifact::Save, "deobfuscated save is not text"))?;
    let compressed = base64_url_decode(text)?;
    let raw = gzip_decompress(&compressed)?;
    let document = String::from_utf8(raw)
        .map_err(|_| Error::format_mismatch(Artifact::Save, "document is not utf-8"))?;

    if !is_xml_document(&document) {
        return Err(Error::format_mismatch(
            Artifact::Save,
            "document is missing the xml declaration",
        ));
    }

    Ok(document)
}

/// Obfuscates an xml document into an outer save
pub fn encrypt_save(document: &str) -> Result<Vec<u8>, Error> {
    let compressed = gzip_compress(document.as_bytes())?;
    let encoded = base64_url_encode(&compressed);
    Ok(xor(encoded.as_bytes(), SAVE_XOR_KEY))
}

/// Decompresses a level string. Input that doesn't start with
/// [`LEVEL_STRING_MAGIC`] is rejected.
///
/// ```
/// use levelsave::envelope::{decrypt_level_string, encrypt_level_string};
///
/// let packed = encrypt_level_string("1,1,2,15,3,15;").unwrap();
/// assert_eq!(decrypt_level_string(&packed).unwrap(), "1,1,2,15,3,15;");
///
/// let err = decrypt_level_string("1,1,2,15,3,15;").unwrap_err();
/// assert!(err.is_format_mismatch());
/// ```
pub fn decrypt_level_string(text: &str) -> Result<String, Error> {
    let text = text.trim();
    if !text.starts_with(LEVEL_STRING_MAGIC) {
        return Err(Error::format_mismatch(
            Artifact::LevelString,
            "missing compressed level string prefix",
        ));
    }

    let compressed = base64_url_decode(text)?;
    let raw = gzip_decompress(&compressed)?;
    String::from_utf8(raw)
        .map_err(|_| Error::format_mismatch(Artifact::LevelString, "level string is not utf-8"))
}

/// Compresses a level string
pub fn encrypt_level_string(text: &str) -> Result<String, Error> {
    let compressed = gzip_compress(text.as_bytes())?;
    Ok(base64_url_encode(&compressed))
}

fn looks_like_records(text: &str) -> bool {
    let text = text.trim_start();
    text.is_empty() || text.starts_with("1,") || text.starts_with("kS") || text.starts_with("kA")
}

/// Returns the object records of a level string, decompressing it if needed
pub fn open_level_string(text: &str) -> Result<Cow<'_, str>, Error> {
    if classify_level_string(text).is_plaintext() {
        return Ok(Cow::Borrowed(text));
    }

    if !text.trim_start().starts_with(LEVEL_STRING_MAGIC) && looks_like_records(text) {
        log::trace!("level string is uncompressed object records");
        return Ok(Cow::Borrowed(text));
    }

    decrypt_level_string(text).map(Cow::Owned)
}
