use crate::{EnumSet, EnumValue, PropertyErrorReason, Scalar};
use std::fmt;

/// The maximum number of groups an object can belong to
pub const MAX_GROUP_IDS: usize = 10;

/// The typed value of a single object property
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PropertyValue {
    /// A 32 bit integer
    Int(i32),

    /// A 16 bit integer. Wider input is truncated the way the game truncates it.
    Short(i16),

    /// A floating point number
    Double(f64),

    /// A flag
    Bool(bool),

    /// Free form text
    Text(String),

    /// A `.` separated list of integers
    IntArray(Vec<i32>),

    /// A color adjustment
    Hsv(HsvAdjustment),

    /// A member of a closed enumeration, possibly out of range
    Enum(EnumValue),
}

impl PropertyValue {
    /// Returns the integral value of integer and enumeration properties
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PropertyValue::Int(x) => Some(i64::from(*x)),
            PropertyValue::Short(x) => Some(i64::from(*x)),
            PropertyValue::Enum(x) => Some(i64::from(x.raw())),
            _ => None,
        }
    }

    /// Returns the numeric value of integer and floating point properties
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Int(x) => Some(f64::from(*x)),
            PropertyValue::Short(x) => Some(f64::from(*x)),
            PropertyValue::Double(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(x) => Some(x.as_str()),
            _ => None,
        }
    }

    pub fn as_int_array(&self) -> Option<&[i32]> {
        match self {
            PropertyValue::IntArray(x) => Some(x.as_slice()),
            _ => None,
        }
    }

    pub fn as_hsv(&self) -> Option<&HsvAdjustment> {
        match self {
            PropertyValue::Hsv(x) => Some(x),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<EnumValue> {
        match self {
            PropertyValue::Enum(x) => Some(*x),
            _ => None,
        }
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Int(value)
    }
}

impl From<i16> for PropertyValue {
    fn from(value: i16) -> Self {
        PropertyValue::Short(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Double(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_owned())
    }
}

impl From<Vec<i32>> for PropertyValue {
    fn from(value: Vec<i32>) -> Self {
        PropertyValue::IntArray(value)
    }
}

impl From<HsvAdjustment> for PropertyValue {
    fn from(value: HsvAdjustment) -> Self {
        PropertyValue::Hsv(value)
    }
}

impl From<EnumValue> for PropertyValue {
    fn from(value: EnumValue) -> Self {
        PropertyValue::Enum(value)
    }
}

/// The declared type of a property slot. Dictates how the raw text of a
/// record is parsed and written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ValueKind {
    Int,
    Short,
    Double,
    Bool,

    /// Text stored as url safe base64 in the record
    Base64Text,

    /// An integer array limited to [`MAX_GROUP_IDS`] unique 16 bit ids
    GroupIds,

    Hsv,
    Enum(EnumSet),
}

impl ValueKind {
    /// Returns true if a value can be stored in a slot of this kind
    pub fn accepts(&self, value: &PropertyValue) -> bool {
        match (self, value) {
            (ValueKind::Int, PropertyValue::Int(_)) => true,
            (ValueKind::Short, PropertyValue::Short(_)) => true,
            (ValueKind::Double, PropertyValue::Double(x)) => x.is_finite(),
            (ValueKind::Bool, PropertyValue::Bool(_)) => true,
            (ValueKind::Base64Text, PropertyValue::Text(_)) => true,
            (ValueKind::GroupIds, PropertyValue::IntArray(_)) => true,
            (ValueKind::Hsv, PropertyValue::Hsv(_)) => true,
            (ValueKind::Enum(set), PropertyValue::Enum(x)) => x.set() == *set,
            _ => false,
        }
    }
}

/// A five field color adjustment: hue shift, saturation and brightness
/// factors, and whether each factor is applied additively instead of
/// multiplicatively.
///
/// Written to a record as the fields joined by `a`.
///
/// ```
/// use levelsave::HsvAdjustment;
///
/// let hsv = HsvAdjustment::parse("-30a0.5a1a1a0").unwrap();
/// assert_eq!(hsv.hue, -30);
/// assert_eq!(hsv.saturation, 0.5);
/// assert!(hsv.saturation_additive);
/// assert_eq!(hsv.to_string(), "-30a0.5a1a1a0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HsvAdjustment {
    pub hue: i32,
    pub saturation: f64,
    pub brightness: f64,
    pub saturation_additive: bool,
    pub brightness_additive: bool,
}

impl HsvAdjustment {
    /// The identity adjustment
    pub const DEFAULT: HsvAdjustment = HsvAdjustment {
        hue: 0,
        saturation: 1.0,
        brightness: 1.0,
        saturation_additive: false,
        brightness_additive: false,
    };

    /// Parse the `a` separated record representation. Exactly five fields are
    /// required.
    pub fn parse(data: &str) -> Result<Self, PropertyErrorReason> {
        let fields: Vec<&str> = data.split('a').collect();
        let [hue, saturation, brightness, sat_add, bright_add] = fields[..] else {
            return Err(PropertyErrorReason::FieldCount {
                expected: 5,
                found: fields.len(),
            });
        };

        Ok(HsvAdjustment {
            hue: Scalar::new(hue).to_i64()? as i32,
            saturation: Scalar::new(saturation).to_f64()?,
            brightness: Scalar::new(brightness).to_f64()?,
            saturation_additive: Scalar::new(sat_add).to_bool()?,
            brightness_additive: Scalar::new(bright_add).to_bool()?,
        })
    }
}

impl Default for HsvAdjustment {
    fn default() -> Self {
        HsvAdjustment::DEFAULT
    }
}

impl fmt::Display for HsvAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}a{}a{}a{}a{}",
            self.hue,
            self.saturation,
            self.brightness,
            self.saturation_additive as u8,
            self.brightness_additive as u8
        )
    }
}

/// A group id list that can't be assigned to an object
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupIdsError {
    /// More than [`MAX_GROUP_IDS`] ids
    TooMany(usize),

    /// The same id appears more than once
    Duplicate(i32),
}

impl fmt::Display for GroupIdsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupIdsError::TooMany(x) => write!(
                f,
                "{} group ids exceeds the maximum of {}",
                x, MAX_GROUP_IDS
            ),
            GroupIdsError::Duplicate(x) => write!(f, "group id {} is duplicated", x),
        }
    }
}

impl std::error::Error for GroupIdsError {}

/// Checks the length and uniqueness constraints of a group id list
pub fn validate_group_ids(ids: &[i32]) -> Result<(), GroupIdsError> {
    if ids.len() > MAX_GROUP_IDS {
        return Err(GroupIdsError::TooMany(ids.len()));
    }

    for (i, id) in ids.iter().enumerate() {
        if ids[..i].contains(id) {
            return Err(GroupIdsError::Duplicate(*id));
        }
    }

    Ok(())
}

/// Truncates every id to the 16 bits a group id is stored in, then checks
/// the list. Decoding and editing both go through here so that an edited
/// list reads back unchanged.
///
/// ```
/// use levelsave::{coerce_group_ids, GroupIdsError};
///
/// assert_eq!(coerce_group_ids(vec![5, 65537]), Ok(vec![5, 1]));
/// assert_eq!(coerce_group_ids(vec![70000, 4464]), Err(GroupIdsError::Duplicate(4464)));
/// ```
pub fn coerce_group_ids(ids: Vec<i32>) -> Result<Vec<i32>, GroupIdsError> {
    let ids: Vec<i32> = ids.into_iter().map(|x| i32::from(x as i16)).collect();
    validate_group_ids(&ids)?;
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Easing;

    #[test]
    fn hsv_default_text() {
        assert_eq!(HsvAdjustment::DEFAULT.to_string(), "0a1a1a0a0");
        assert_eq!(HsvAdjustment::parse("0a1a1a0a0"), Ok(HsvAdjustment::DEFAULT));
    }

    #[test]
    fn hsv_field_count() {
        assert_eq!(
            HsvAdjustment::parse("0a1a1a0"),
            Err(PropertyErrorReason::FieldCount {
                expected: 5,
                found: 4
            })
        );
        assert!(HsvAdjustment::parse("0a1a1a0a0a0").is_err());
        assert!(HsvAdjustment::parse("xa1a1a0a0").is_err());
    }

    #[test]
    fn group_id_validation() {
        assert_eq!(validate_group_ids(&[]), Ok(()));
        assert_eq!(validate_group_ids(&[1, 2, 3]), Ok(()));
        assert_eq!(
            validate_group_ids(&[1, 2, 1]),
            Err(GroupIdsError::Duplicate(1))
        );
        let eleven: Vec<i32> = (1..=11).collect();
        assert_eq!(validate_group_ids(&eleven), Err(GroupIdsError::TooMany(11)));
        let ten: Vec<i32> = (1..=10).collect();
        assert_eq!(validate_group_ids(&ten), Ok(()));
    }

    #[test]
    fn value_kind_accepts() {
        assert!(ValueKind::Short.accepts(&PropertyValue::Short(4)));
        assert!(!ValueKind::Short.accepts(&PropertyValue::Int(4)));
        assert!(!ValueKind::Double.accepts(&PropertyValue::Double(f64::NAN)));
        assert!(ValueKind::Base64Text.accepts(&PropertyValue::from("hi")));
        assert!(ValueKind::GroupIds.accepts(&PropertyValue::IntArray(vec![1, 2])));
        assert!(!ValueKind::GroupIds.accepts(&PropertyValue::Short(1)));
        assert!(!ValueKind::Int.accepts(&PropertyValue::IntArray(vec![1])));
        assert!(ValueKind::Enum(EnumSet::Easing).accepts(&PropertyValue::from(Easing::SineIn)));
        assert!(!ValueKind::Enum(EnumSet::ZLayer).accepts(&PropertyValue::from(Easing::SineIn)));
    }
}
