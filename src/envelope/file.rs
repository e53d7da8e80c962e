use super::{
    classify_save, decrypt_save, embedded_level_strings, encrypt_level_string, encrypt_save,
    open_level_string, reinsert_embedded_level_string, EmbeddedLevelString, EmbeddedLevelStrings,
    SaveState,
};
use crate::{Artifact, DecodeReport, Error, ErrorKind, Level, Registry};
use std::{fs::File, io::Read};

/// Read and rewrite a save from memory or from the file system.
///
/// The source state is remembered so that [`SaveFile::to_bytes`] writes the
/// save back the way it was found.
///
/// ```
/// use levelsave::envelope::{encrypt_level_string, encrypt_save, SaveFile};
/// use levelsave::Registry;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let level = encrypt_level_string("1,1,2,15,3,15;")?;
/// let doc = format!(
///     r#"<?xml version="1.0"?><plist version="1.0" gjver="2.0"><dict><k>k4</k><s>{}</s></dict></plist>"#,
///     level
/// );
/// let blob = encrypt_save(&doc)?;
///
/// let mut save = SaveFile::from_slice(&blob)?;
/// let registry = Registry::new();
/// let (mut level, report) = save.level(0, &registry)?;
/// assert!(report.is_clean());
///
/// level.objects.get_mut(0).unwrap().set_position(30.0, 15.0);
/// save.set_level(0, &level)?;
///
/// let reread = SaveFile::from_slice(save.to_bytes()?)?;
/// let (level, _) = reread.level(0, &registry)?;
/// assert_eq!(level.objects.get(0).unwrap().x(), 30.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SaveFile {
    state: SaveState,
    document: String,
}

impl SaveFile {
    /// Creates a save from a slice of data, deobfuscating it if necessary
    pub fn from_slice(data: impl AsRef<[u8]>) -> Result<SaveFile, Error> {
        let data = data.as_ref();
        let state = classify_save(data);
        log::trace!("save classified as {:?}", state);

        let document = match state {
            SaveState::Plaintext => String::from_utf8(data.to_vec())
                .map_err(|_| Error::format_mismatch(Artifact::Save, "document is not utf-8"))?,
            SaveState::Obfuscated => decrypt_save(data)?,
        };

        Ok(SaveFile { state, document })
    }

    /// Creates a save from a file handle
    pub fn from_file(mut file: File) -> Result<SaveFile, Error> {
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        SaveFile::from_slice(data)
    }

    /// The state the save was in when it was read
    pub fn state(&self) -> SaveState {
        self.state
    }

    /// The plaintext xml document
    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn into_document(self) -> String {
        self.document
    }

    /// The level strings embedded in the document
    pub fn level_strings(&self) -> EmbeddedLevelStrings<'_> {
        embedded_level_strings(&self.document)
    }

    fn level_string(&self, index: usize) -> Result<EmbeddedLevelString<'_>, Error> {
        self.level_strings().nth(index).ok_or_else(|| {
            Error::new(ErrorKind::IndexOutOfBounds {
                index,
                len: self.level_strings().count(),
            })
        })
    }

    /// Opens and decodes the level string at the given index
    pub fn level(&self, index: usize, registry: &Registry) -> Result<(Level, DecodeReport), Error> {
        let embedded = self.level_string(index)?;
        let text = open_level_string(embedded.payload())?;
        Ok(Level::decode(&text, registry))
    }

    /// Replaces the payload of the level string at the given index. The
    /// payload is written verbatim.
    pub fn set_level_string(&mut self, index: usize, payload: &str) -> Result<(), Error> {
        let embedded = self.level_string(index)?;
        self.document = reinsert_embedded_level_string(&self.document, &embedded, payload)
            .ok_or_else(|| {
                Error::format_mismatch(Artifact::Save, "level string outside of document")
            })?;
        Ok(())
    }

    /// Encodes and compresses a level into the level string at the given index
    pub fn set_level(&mut self, index: usize, level: &Level) -> Result<(), Error> {
        let payload = encrypt_level_string(&level.encode())?;
        self.set_level_string(index, &payload)
    }

    /// Writes the save back out, obfuscating it if it was read obfuscated
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        match self.state {
            SaveState::Plaintext => Ok(self.document.as_bytes().to_vec()),
            SaveState::Obfuscated => encrypt_save(&self.document),
        }
    }
}
