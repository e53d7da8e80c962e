use crate::{GroupIdsError, ObjectKind, Property, ScalarError, ValueKind};
use std::fmt;

/// An error that can occur when processing save data
#[derive(Debug)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub(crate) fn new(kind: ErrorKind) -> Error {
        Error(Box::new(kind))
    }

    /// Return the specific type of error
    pub fn kind(&self) -> &ErrorKind {
        &self.0
    }

    /// Consume the error and return the specific type of error
    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    /// Returns true if the input did not match any recognized signature
    pub fn is_format_mismatch(&self) -> bool {
        matches!(*self.0, ErrorKind::FormatMismatch { .. })
    }

    pub(crate) fn format_mismatch(artifact: Artifact, reason: &'static str) -> Error {
        Error::new(ErrorKind::FormatMismatch { artifact, reason })
    }
}

/// The artifact that was being processed when a format mismatch was detected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    /// The outer, XOR obfuscated save
    Save,

    /// A level string, either standalone or embedded in a save
    LevelString,

    /// A raw gzip stream
    Gzip,

    /// A base64 payload
    Base64,
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Artifact::Save => f.write_str("save"),
            Artifact::LevelString => f.write_str("level string"),
            Artifact::Gzip => f.write_str("gzip stream"),
            Artifact::Base64 => f.write_str("base64 payload"),
        }
    }
}

/// Specific type of error
#[derive(Debug)]
pub enum ErrorKind {
    /// The envelope or payload does not match any recognized signature
    FormatMismatch {
        artifact: Artifact,
        reason: &'static str,
    },

    /// A single key/value pair failed its type directed parse
    PropertyParse(PropertyError),

    /// The object id matched no kind and no fallback applies
    UnresolvableObjectKind { object_id: i32 },

    /// The record did not contain the object id pair
    MissingObjectId,

    /// The object id pair was present but not an integer
    InvalidObjectId(ScalarError),

    /// The property has no slot in the given kind
    UnknownProperty {
        kind: ObjectKind,
        property: Property,
    },

    /// The value does not have the type the slot expects
    TypeMismatch {
        property: Property,
        expected: ValueKind,
    },

    /// The group id list violates its length or uniqueness constraint
    InvalidGroupIds(GroupIdsError),

    /// The property holds a value that can't be offset numerically
    NotNumeric { property: Property },

    /// A multi-selection query was given no objects
    EmptySelection,

    /// A multi-selection query was given objects of differing kinds
    MixedKinds,

    /// An index into a collection was out of bounds
    IndexOutOfBounds { index: usize, len: usize },

    /// Decoding was interrupted by the caller's cancellation flag
    Cancelled,

    /// The underlying reader or writer failed
    Io(std::io::Error),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self.0 {
            ErrorKind::PropertyParse(ref err) => Some(err),
            ErrorKind::InvalidObjectId(ref err) => Some(err),
            ErrorKind::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self.0 {
            ErrorKind::FormatMismatch { artifact, reason } => {
                write!(f, "unrecognized {}: {}", artifact, reason)
            }
            ErrorKind::PropertyParse(ref err) => write!(f, "property error: {}", err),
            ErrorKind::UnresolvableObjectKind { object_id } => {
                write!(f, "object id {} does not resolve to a kind", object_id)
            }
            ErrorKind::MissingObjectId => write!(f, "record is missing the object id"),
            ErrorKind::InvalidObjectId(ref err) => write!(f, "invalid object id: {}", err),
            ErrorKind::UnknownProperty { kind, property } => {
                write!(f, "{} has no {} property", kind, property)
            }
            ErrorKind::TypeMismatch { property, expected } => write!(
                f,
                "{} expects a value of type {:?}",
                property, expected
            ),
            ErrorKind::InvalidGroupIds(ref err) => write!(f, "invalid group ids: {}", err),
            ErrorKind::NotNumeric { property } => {
                write!(f, "{} can not be offset by a number", property)
            }
            ErrorKind::EmptySelection => write!(f, "selection is empty"),
            ErrorKind::MixedKinds => write!(f, "selection contains objects of different kinds"),
            ErrorKind::IndexOutOfBounds { index, len } => {
                write!(f, "index {} out of bounds for length {}", index, len)
            }
            ErrorKind::Cancelled => write!(f, "decoding cancelled"),
            ErrorKind::Io(ref err) => write!(f, "io error: {}", err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::new(ErrorKind::Io(error))
    }
}

impl From<PropertyError> for Error {
    fn from(error: PropertyError) -> Self {
        Error::new(ErrorKind::PropertyParse(error))
    }
}

impl From<GroupIdsError> for Error {
    fn from(error: GroupIdsError) -> Self {
        Error::new(ErrorKind::InvalidGroupIds(error))
    }
}

/// A key/value pair that could not be parsed into the type its slot declares
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyError {
    pub(crate) key: u32,
    pub(crate) raw: String,
    pub(crate) reason: PropertyErrorReason,
}

impl PropertyError {
    pub(crate) fn new(key: u32, raw: &str, reason: PropertyErrorReason) -> Self {
        PropertyError {
            key,
            raw: raw.to_owned(),
            reason,
        }
    }

    /// The numeric key of the offending pair, or 0 if the key itself is not
    /// an integer
    pub fn key(&self) -> u32 {
        self.key
    }

    /// The raw text of the offending value
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Why the value was rejected
    pub fn reason(&self) -> &PropertyErrorReason {
        &self.reason
    }
}

/// The reason a property value failed to parse
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyErrorReason {
    /// Error converting a numeric field
    Scalar(ScalarError),

    /// A tuple value did not have the expected number of fields
    FieldCount { expected: usize, found: usize },

    /// A group id list was too long or held duplicates
    GroupIds(GroupIdsError),

    /// Embedded text was not valid url safe base64
    Base64,

    /// The key of the pair is not an unsigned 32 bit integer
    InvalidKey(String),
}

impl std::error::Error for PropertyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.reason {
            PropertyErrorReason::Scalar(ref err) => Some(err),
            PropertyErrorReason::GroupIds(ref err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.reason {
            PropertyErrorReason::InvalidKey(ref key) => write!(f, "key {:?} ", key)?,
            _ => write!(f, "key {} ", self.key)?,
        }

        write!(f, "({:?}): ", self.raw)?;
        match self.reason {
            PropertyErrorReason::Scalar(ref e) => e.fmt(f),
            PropertyErrorReason::FieldCount { expected, found } => {
                write!(f, "expected {} fields but found {}", expected, found)
            }
            PropertyErrorReason::GroupIds(ref e) => e.fmt(f),
            PropertyErrorReason::Base64 => write!(f, "not valid base64"),
            PropertyErrorReason::InvalidKey(_) => write!(f, "key is not an integer"),
        }
    }
}

impl From<ScalarError> for PropertyErrorReason {
    fn from(error: ScalarError) -> Self {
        PropertyErrorReason::Scalar(error)
    }
}

impl From<GroupIdsError> for PropertyErrorReason {
    fn from(error: GroupIdsError) -> Self {
        PropertyErrorReason::GroupIds(error)
    }
}
