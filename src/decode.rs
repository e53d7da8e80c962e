use crate::registry::OBJECT_ID_KEY;
use crate::transform::decode_record_text;
use crate::{
    coerce_group_ids, EnumValue, Error, ErrorKind, HsvAdjustment, LevelObject,
    LevelObjectCollection, PropertyError, PropertyErrorReason, PropertyValue, Registry, Scalar,
    ScalarError, ValueKind,
};
use std::sync::atomic::{AtomicBool, Ordering};

/// Iterates the `;` terminated records of a level string. Surrounding
/// whitespace is trimmed and empty records (such as the one after the final
/// terminator) are skipped.
pub fn records(text: &str) -> impl Iterator<Item = &str> + '_ {
    text.split(';').map(str::trim).filter(|x| !x.is_empty())
}

/// Iterates the raw `key,value` pairs of a single record.
///
/// A trailing key without a value, as left behind by a truncated record, is
/// ignored.
///
/// ```
/// use levelsave::RecordReader;
///
/// let pairs: Vec<_> = RecordReader::new("1,12,2,50,3").collect();
/// assert_eq!(pairs, vec![("1", "12"), ("2", "50")]);
/// ```
#[derive(Debug, Clone)]
pub struct RecordReader<'a> {
    fields: std::str::Split<'a, char>,
}

impl<'a> RecordReader<'a> {
    pub fn new(record: &'a str) -> Self {
        RecordReader {
            fields: record.split(','),
        }
    }
}

impl<'a> Iterator for RecordReader<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.fields.next()?;
        let value = self.fields.next()?;
        Some((key, value))
    }
}

/// Describes how to handle a property value that fails to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailedPropertyStrategy {
    /// Skip the property, keep the rest of the record and report it
    #[default]
    Skip,

    /// Fail the whole decode
    Error,
}

/// Describes how to handle a record whose object id is missing, malformed or
/// doesn't resolve to a kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnresolvedKindStrategy {
    /// Drop the record, keep decoding and report it
    #[default]
    Drop,

    /// Fail the whole decode
    Error,
}

/// Builds a tweaked object decoder
#[derive(Debug, Default)]
pub struct DecoderBuilder {
    failed_property: FailedPropertyStrategy,
    unresolved_kind: UnresolvedKindStrategy,
}

impl DecoderBuilder {
    pub fn new() -> Self {
        DecoderBuilder::default()
    }

    pub fn on_failed_property(&mut self, strategy: FailedPropertyStrategy) -> &mut Self {
        self.failed_property = strategy;
        self
    }

    pub fn on_unresolved_kind(&mut self, strategy: UnresolvedKindStrategy) -> &mut Self {
        self.unresolved_kind = strategy;
        self
    }

    pub fn build<'a>(&self, registry: &'a Registry) -> ObjectDecoder<'a> {
        ObjectDecoder {
            registry,
            failed_property: self.failed_property,
            unresolved_kind: self.unresolved_kind,
        }
    }
}

/// A decoded object and the properties that had to be skipped to decode it
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedObject {
    pub object: LevelObject,
    pub skipped: Vec<PropertyError>,
}

/// A property that was skipped while decoding a batch
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedProperty {
    /// Position of the record in the batch
    pub record: usize,
    pub error: PropertyError,
}

/// A record that was dropped while decoding a batch
#[derive(Debug)]
pub struct DroppedRecord {
    /// Position of the record in the batch
    pub record: usize,
    pub error: Error,
}

/// The failures that were recovered from while decoding a batch of records
#[derive(Debug, Default)]
pub struct DecodeReport {
    skipped: Vec<SkippedProperty>,
    dropped: Vec<DroppedRecord>,
}

impl DecodeReport {
    pub fn skipped(&self) -> &[SkippedProperty] {
        &self.skipped
    }

    pub fn dropped(&self) -> &[DroppedRecord] {
        &self.dropped
    }

    /// Returns true if every record and property decoded
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.dropped.is_empty()
    }

    pub(crate) fn push_skipped(&mut self, record: usize, errors: Vec<PropertyError>) {
        self.skipped
            .extend(errors.into_iter().map(|error| SkippedProperty { record, error }));
    }

    pub(crate) fn push_dropped(&mut self, record: usize, error: Error) {
        log::warn!("dropping record {}: {}", record, error);
        self.dropped.push(DroppedRecord { record, error });
    }
}

fn is_record_error(error: &Error) -> bool {
    matches!(
        error.kind(),
        ErrorKind::UnresolvableObjectKind { .. }
            | ErrorKind::MissingObjectId
            | ErrorKind::InvalidObjectId(_)
    )
}

/// Decodes object records into level objects.
///
/// ```
/// use levelsave::{ObjectDecoder, ObjectKind, Registry};
///
/// let registry = Registry::new();
/// let decoder = ObjectDecoder::new(&registry);
/// let decoded = decoder.decode("1,12,2,50,3,75").unwrap();
/// assert_eq!(decoded.object.kind(), ObjectKind::CubePortal);
/// assert_eq!(decoded.object.x(), 50.0);
/// assert_eq!(decoded.object.y(), 75.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ObjectDecoder<'a> {
    registry: &'a Registry,
    failed_property: FailedPropertyStrategy,
    unresolved_kind: UnresolvedKindStrategy,
}

impl<'a> ObjectDecoder<'a> {
    /// Creates a decoder that skips bad properties and drops bad records
    pub fn new(registry: &'a Registry) -> Self {
        DecoderBuilder::new().build(registry)
    }

    pub fn builder() -> DecoderBuilder {
        DecoderBuilder::new()
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Decodes a single record. The object id is read first wherever it sits
    /// in the record.
    pub fn decode(&self, record: &str) -> Result<DecodedObject, Error> {
        let id = RecordReader::new(record)
            .find(|(key, _)| parse_key(key) == Some(OBJECT_ID_KEY))
            .map(|(_, value)| value)
            .ok_or_else(|| Error::new(ErrorKind::MissingObjectId))?;

        let id = parse_int(id).map_err(|e| Error::new(ErrorKind::InvalidObjectId(e)))? as i32;
        let mut object = self.registry.instantiate(id)?;
        let kind = object.kind();
        let mut skipped = Vec::new();

        for (raw_key, raw) in RecordReader::new(record) {
            let outcome = match parse_key(raw_key) {
                Some(OBJECT_ID_KEY) => continue,
                Some(key) => match self.registry.slot(kind, key) {
                    Some(slot) => parse_value(slot.value_kind(), raw)
                        .map(|value| object.store(slot, value))
                        .map_err(|reason| PropertyError::new(key, raw, reason)),
                    None => {
                        object.set_extra(key, raw.trim());
                        Ok(())
                    }
                },
                None => Err(PropertyError::new(
                    0,
                    raw,
                    PropertyErrorReason::InvalidKey(raw_key.trim().to_owned()),
                )),
            };

            if let Err(error) = outcome {
                if self.failed_property == FailedPropertyStrategy::Error {
                    return Err(error.into());
                }

                log::debug!("skipping pair of {} record: {}", kind, error);
                skipped.push(error);
            }
        }

        Ok(DecodedObject { object, skipped })
    }

    fn absorb(
        &self,
        record: usize,
        outcome: Result<DecodedObject, Error>,
        report: &mut DecodeReport,
    ) -> Result<Option<LevelObject>, Error> {
        match outcome {
            Ok(decoded) => {
                report.push_skipped(record, decoded.skipped);
                Ok(Some(decoded.object))
            }
            Err(error)
                if self.unresolved_kind == UnresolvedKindStrategy::Drop
                    && is_record_error(&error) =>
            {
                report.push_dropped(record, error);
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    /// Decodes every record of a level string, preserving record order
    pub fn decode_all(&self, text: &str) -> Result<(LevelObjectCollection, DecodeReport), Error> {
        let mut report = DecodeReport::default();
        let mut objects = Vec::new();
        for (index, record) in records(text).enumerate() {
            if let Some(object) = self.absorb(index, self.decode(record), &mut report)? {
                objects.push(object);
            }
        }

        Ok((LevelObjectCollection::from(objects), report))
    }

    /// Decodes the records on up to `threads` scoped threads, never more than
    /// the machine's available parallelism. Each thread
    /// decodes a contiguous run of records into its own region of a pre-sized
    /// outcome vector so the result is identical to [`ObjectDecoder::decode_all`].
    pub fn decode_parallel(
        &self,
        text: &str,
        threads: usize,
    ) -> Result<(LevelObjectCollection, DecodeReport), Error> {
        let records: Vec<&str> = records(text).collect();
        if records.is_empty() {
            return Ok((LevelObjectCollection::new(), DecodeReport::default()));
        }

        let chunk_len = records.len().div_ceil(worker_count(threads));
        let mut outcomes: Vec<Option<Result<DecodedObject, Error>>> =
            (0..records.len()).map(|_| None).collect();

        std::thread::scope(|scope| {
            for (records, outcomes) in records.chunks(chunk_len).zip(outcomes.chunks_mut(chunk_len)) {
                scope.spawn(move || {
                    for (record, outcome) in records.iter().zip(outcomes.iter_mut()) {
                        *outcome = Some(self.decode(record));
                    }
                });
            }
        });

        let mut report = DecodeReport::default();
        let mut objects = Vec::with_capacity(records.len());
        for (index, outcome) in outcomes.into_iter().enumerate() {
            let Some(outcome) = outcome else {
                continue;
            };

            if let Some(object) = self.absorb(index, outcome, &mut report)? {
                objects.push(object);
            }
        }

        Ok((LevelObjectCollection::from(objects), report))
    }

    /// Decodes the records `chunk_len` at a time, checking the cancellation
    /// flag before each chunk
    pub fn decode_chunked(
        &self,
        text: &str,
        chunk_len: usize,
        cancel: &AtomicBool,
    ) -> Result<(LevelObjectCollection, DecodeReport), Error> {
        let records: Vec<&str> = records(text).collect();
        let mut report = DecodeReport::default();
        let mut objects = Vec::with_capacity(records.len());

        for (chunk_index, chunk) in records.chunks(chunk_len.max(1)).enumerate() {
            if cancel.load(Ordering::Relaxed) {
                return Err(Error::new(ErrorKind::Cancelled));
            }

            let offset = chunk_index * chunk_len.max(1);
            for (i, record) in chunk.iter().enumerate() {
                if let Some(object) = self.absorb(offset + i, self.decode(record), &mut report)? {
                    objects.push(object);
                }
            }
        }

        Ok((LevelObjectCollection::from(objects), report))
    }
}

/// Caps the requested thread count at the available parallelism
fn worker_count(threads: usize) -> usize {
    let available = std::thread::available_parallelism().map_or(1, |x| x.get());
    threads.clamp(1, available)
}

/// Keys are unsigned integers that fit in 32 bits
fn parse_key(raw: &str) -> Option<u32> {
    Scalar::new(raw.trim())
        .to_u64()
        .ok()
        .and_then(|x| u32::try_from(x).ok())
}

/// Integers are usually written as such, but a decimal is accepted and
/// truncated the way the game reads it
fn parse_int(raw: &str) -> Result<i64, ScalarError> {
    let scalar = Scalar::new(raw.trim());
    scalar
        .to_i64()
        .or_else(|e| scalar.to_f64().map(|x| x as i64).map_err(|_| e))
}

fn parse_int_array(raw: &str) -> Result<Vec<i32>, ScalarError> {
    raw.split('.')
        .filter(|x| !x.is_empty())
        .map(|x| parse_int(x).map(|x| x as i32))
        .collect()
}

/// Parses raw record text into the type the slot declares
pub(crate) fn parse_value(kind: ValueKind, raw: &str) -> Result<PropertyValue, PropertyErrorReason> {
    let value = match kind {
        ValueKind::Int => PropertyValue::Int(parse_int(raw)? as i32),
        ValueKind::Short => PropertyValue::Short(parse_int(raw)? as i16),
        ValueKind::Double => PropertyValue::Double(Scalar::new(raw.trim()).to_f64()?),
        ValueKind::Bool => PropertyValue::Bool(parse_int(raw)? != 0),
        ValueKind::Base64Text => {
            PropertyValue::Text(decode_record_text(raw).ok_or(PropertyErrorReason::Base64)?)
        }
        ValueKind::GroupIds => PropertyValue::IntArray(coerce_group_ids(parse_int_array(raw)?)?),
        ValueKind::Hsv => PropertyValue::Hsv(HsvAdjustment::parse(raw)?),
        ValueKind::Enum(set) => PropertyValue::Enum(EnumValue::new(set, parse_int(raw)? as i32)),
    };

    Ok(value)
}
