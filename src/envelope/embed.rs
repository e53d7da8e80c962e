use std::ops::Range;

/// The dictionary entry that holds a level string inside a save document
pub const LEVEL_STRING_OPEN: &str = "<k>k4</k><s>";

const LEVEL_STRING_CLOSE: &str = "</s>";

/// A level string located inside a save document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedLevelString<'a> {
    span: Range<usize>,
    payload: &'a str,
}

impl<'a> EmbeddedLevelString<'a> {
    /// The level string as stored in the document, usually compressed
    pub fn payload(&self) -> &'a str {
        self.payload
    }

    /// Byte range of the payload within the document
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

/// Iterator over the level strings embedded in a save document, in document
/// order
#[derive(Debug, Clone)]
pub struct EmbeddedLevelStrings<'a> {
    document: &'a str,
    offset: usize,
}

impl<'a> Iterator for EmbeddedLevelStrings<'a> {
    type Item = EmbeddedLevelString<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.document.get(self.offset..)?;
        let start = self.offset + rest.find(LEVEL_STRING_OPEN)? + LEVEL_STRING_OPEN.len();
        let end = start + self.document[start..].find(LEVEL_STRING_CLOSE)?;
        self.offset = end + LEVEL_STRING_CLOSE.len();
        Some(EmbeddedLevelString {
            span: start..end,
            payload: &self.document[start..end],
        })
    }
}

/// Iterates every level string in a save document. A local levels save holds
/// one per level.
pub fn embedded_level_strings(document: &str) -> EmbeddedLevelStrings<'_> {
    EmbeddedLevelStrings {
        document,
        offset: 0,
    }
}

/// Locates the first level string in a save document
///
/// ```
/// use levelsave::envelope::extract_embedded_level_string;
///
/// let doc = "<d><k>k2</k><s>Stereo</s><k>k4</k><s>H4sIAAAAAAAAA</s></d>";
/// let embedded = extract_embedded_level_string(doc).unwrap();
/// assert_eq!(embedded.payload(), "H4sIAAAAAAAAA");
/// ```
pub fn extract_embedded_level_string(document: &str) -> Option<EmbeddedLevelString<'_>> {
    embedded_level_strings(document).next()
}

/// Returns a copy of the document with the given level string's payload
/// swapped out. Every other byte is left untouched.
///
/// Returns `None` when the level string was not found in this document, that
/// is when its span does not hold its payload here.
pub fn reinsert_embedded_level_string(
    document: &str,
    embedded: &EmbeddedLevelString<'_>,
    payload: &str,
) -> Option<String> {
    let span = embedded.span();
    if document.get(span.clone()) != Some(embedded.payload()) {
        return None;
    }

    let head = document.get(..span.start)?;
    let tail = document.get(span.end..)?;
    let mut result = String::with_capacity(head.len() + payload.len() + tail.len());
    result.push_str(head);
    result.push_str(payload);
    result.push_str(tail);
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = "<d><k>k1</k><i>1</i><k>k4</k><s>AAA</s><k>k5</k><s>x</s></d>\
        <d><k>k4</k><s>BBBB</s></d><d><k>k4</k><s></s></d>";

    #[test]
    fn iterates_all_level_strings() {
        let payloads: Vec<_> = embedded_level_strings(DOCUMENT)
            .map(|x| x.payload())
            .collect();
        assert_eq!(payloads, vec!["AAA", "BBBB", ""]);
    }

    #[test]
    fn reinsert_only_touches_payload() {
        let second = embedded_level_strings(DOCUMENT).nth(1).unwrap();
        let updated = reinsert_embedded_level_string(DOCUMENT, &second, "CC").unwrap();
        assert_eq!(updated, DOCUMENT.replacen("BBBB", "CC", 1));

        let payloads: Vec<_> = embedded_level_strings(&updated)
            .map(|x| x.payload().to_owned())
            .collect();
        assert_eq!(payloads, vec!["AAA", "CC", ""]);
    }

    #[test]
    fn reinsert_rejects_foreign_level_string() {
        let short = "<k>k4</k><s>Z</s>";
        let foreign = embedded_level_strings(DOCUMENT).nth(1).unwrap();
        assert!(reinsert_embedded_level_string(short, &foreign, "CC").is_none());

        // Same span length but different contents
        let shifted = DOCUMENT.replacen("BBBB", "DDDD", 1);
        assert!(reinsert_embedded_level_string(&shifted, &foreign, "CC").is_none());

        let own = extract_embedded_level_string(short).unwrap();
        assert_eq!(
            reinsert_embedded_level_string(short, &own, "").as_deref(),
            Some("<k>k4</k><s></s>")
        );
    }

    #[test]
    fn missing_level_string() {
        assert!(extract_embedded_level_string("<d><k>k2</k><s>x</s></d>").is_none());
        assert!(extract_embedded_level_string("<k>k4</k><s>unterminated").is_none());
    }
}
