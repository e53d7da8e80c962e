use crate::{DecodeReport, Error, LevelObjectCollection, ObjectDecoder, RecordReader, Registry};

/// The level settings record that precedes the objects of a level string.
///
/// Its keys are strings (`kS38`, `kA13`, …) and its values are kept verbatim
/// in their original order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelHeader {
    pairs: Vec<(String, String)>,
}

impl LevelHeader {
    pub fn new() -> Self {
        LevelHeader::default()
    }

    fn parse(record: &str) -> Self {
        let pairs = RecordReader::new(record)
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        LevelHeader { pairs }
    }

    /// Returns the raw value of a settings key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Sets a settings key, keeping its position if it already exists
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let pos = self.pairs.iter().position(|(k, _)| k == key)?;
        Some(self.pairs.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn encode_into(&self, out: &mut String) {
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i != 0 {
                out.push(',');
            }
            out.push_str(key);
            out.push(',');
            out.push_str(value);
        }
        out.push(';');
    }
}

/// A decoded level string: the settings header and the objects.
///
/// ```
/// use levelsave::{Level, Registry};
///
/// let registry = Registry::new();
/// let text = "kS38,1_40_2_125_3_255,kA13,0,kA2,0;1,1,2,15,3,15;";
/// let (level, report) = Level::decode(text, &registry);
/// assert!(report.is_clean());
/// assert_eq!(level.header.get("kA2"), Some("0"));
/// assert_eq!(level.objects.len(), 1);
/// assert_eq!(level.encode(), text);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Level {
    pub header: LevelHeader,
    pub objects: LevelObjectCollection,
}

/// Splits off the leading settings record if the level string has one. A
/// settings record is recognized by its first key not being numeric.
fn split_header(text: &str) -> (Option<&str>, &str) {
    let text = text.trim_start();
    let (first, rest) = text.split_once(';').unwrap_or((text, ""));
    let first_key = first.split(',').next().unwrap_or_default().trim();
    let numeric = !first_key.is_empty() && first_key.bytes().all(|x| x.is_ascii_digit());
    if first_key.is_empty() || numeric {
        (None, text)
    } else {
        (Some(first), rest)
    }
}

impl Level {
    /// Decodes a plaintext level string with the default strategies. Record
    /// indices in the report count object records only.
    pub fn decode(text: &str, registry: &Registry) -> (Level, DecodeReport) {
        let (header, body) = split_header(text);
        let (objects, report) = LevelObjectCollection::decode_all(body, registry);
        let header = header.map(LevelHeader::parse).unwrap_or_default();
        (Level { header, objects }, report)
    }

    /// Decodes a plaintext level string with a configured decoder
    pub fn decode_with(text: &str, decoder: &ObjectDecoder<'_>) -> Result<(Level, DecodeReport), Error> {
        let (header, body) = split_header(text);
        let (objects, report) = decoder.decode_all(body)?;
        let header = header.map(LevelHeader::parse).unwrap_or_default();
        Ok((Level { header, objects }, report))
    }

    /// Encodes the header, if any, followed by every object
    pub fn encode(&self) -> String {
        let mut out = String::new();
        if !self.header.is_empty() {
            self.header.encode_into(&mut out);
        }
        out.push_str(&self.objects.encode_all());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FailedPropertyStrategy, ObjectDecoder};

    #[test]
    fn level_without_header() {
        let registry = Registry::new();
        let (level, _) = Level::decode("1,1,2,15;1,8,2,45;", &registry);
        assert!(level.header.is_empty());
        assert_eq!(level.objects.len(), 2);
        assert_eq!(level.encode(), "1,1,2,15;1,8,2,45;");
    }

    #[test]
    fn header_only() {
        let registry = Registry::new();
        let (level, report) = Level::decode("kS38,1_0,kA13,0;", &registry);
        assert!(report.is_clean());
        assert_eq!(level.header.len(), 2);
        assert!(level.objects.is_empty());
    }

    #[test]
    fn empty_level() {
        let registry = Registry::new();
        let (level, report) = Level::decode("", &registry);
        assert!(report.is_clean());
        assert_eq!(level, Level::default());
        assert_eq!(level.encode(), "");
    }

    #[test]
    fn header_editing() {
        let mut header = LevelHeader::new();
        header.set("kA13", "0");
        header.set("kA15", "0");
        header.set("kA13", "1");
        assert_eq!(header.iter().collect::<Vec<_>>(), vec![("kA13", "1"), ("kA15", "0")]);
        assert_eq!(header.remove("kA13").as_deref(), Some("1"));
        assert_eq!(header.get("kA13"), None);
    }

    #[test]
    fn decode_with_strategy() {
        let registry = Registry::new();
        let decoder = ObjectDecoder::builder()
            .on_failed_property(FailedPropertyStrategy::Error)
            .build(&registry);
        assert!(Level::decode_with("kA13,0;1,1,2,15;", &decoder).is_ok());
        assert!(Level::decode_with("kA13,0;1,1,2,abc;", &decoder).is_err());
    }
}
