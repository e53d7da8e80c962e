use crate::registry::{KindDescriptor, PropertySlot, Storage};
use crate::{
    coerce_group_ids, Error, ErrorKind, ObjectKind, Property, PropertyValue, ValueKind,
};
use std::collections::BTreeMap;

/// Fixed size storage for the boolean properties of an object. Which bit holds
/// which property is declared by the kind's slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct FlagSet(u32);

impl FlagSet {
    /// The number of flags that can be stored
    pub const CAPACITY: u32 = u32::BITS;

    #[inline]
    pub fn get(&self, bit: u8) -> bool {
        self.0 & (1 << bit) != 0
    }

    #[inline]
    pub fn set(&mut self, bit: u8, value: bool) {
        if value {
            self.0 |= 1 << bit;
        } else {
            self.0 &= !(1 << bit);
        }
    }

    /// The raw bits
    pub fn bits(&self) -> u32 {
        self.0
    }
}

/// A single placed object: its object id, resolved kind and the sparse set of
/// properties that differ from the kind's defaults.
///
/// ```
/// use levelsave::{LevelObject, ObjectKind, Property, PropertyValue};
///
/// let mut portal = LevelObject::new(ObjectKind::CubePortal, 12);
/// portal.set_position(50.0, 75.0);
/// portal.set(Property::Checked, true.into()).unwrap();
///
/// assert_eq!(portal.x(), 50.0);
/// assert_eq!(portal.get(Property::Checked), Some(PropertyValue::Bool(true)));
///
/// // Properties the kind doesn't declare are rejected
/// assert!(portal.set(Property::Duration, 1.0.into()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LevelObject {
    id: i32,
    kind: ObjectKind,
    flags: FlagSet,
    values: BTreeMap<Property, PropertyValue>,
    extra: Vec<(u32, String)>,
}

impl LevelObject {
    /// Creates an object with every property at its default. The object id
    /// is not checked against the kind.
    pub fn new(kind: ObjectKind, id: i32) -> Self {
        LevelObject {
            id,
            kind,
            flags: FlagSet::default(),
            values: BTreeMap::new(),
            extra: Vec::new(),
        }
    }

    /// Creates an object of a kind with its canonical object id
    pub fn of_kind(kind: ObjectKind) -> Option<Self> {
        kind.descriptor()
            .default_object_id()
            .map(|id| LevelObject::new(kind, id))
    }

    /// The object id
    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn descriptor(&self) -> &'static KindDescriptor {
        self.kind.descriptor()
    }

    /// The boolean properties of the object
    pub fn flags(&self) -> FlagSet {
        self.flags
    }

    /// Returns the current value of a property, or `None` if the object's kind
    /// doesn't declare it
    pub fn get(&self, property: Property) -> Option<PropertyValue> {
        self.descriptor()
            .slot(property)
            .map(|slot| self.slot_value(slot))
    }

    pub(crate) fn slot_value(&self, slot: &'static PropertySlot) -> PropertyValue {
        match slot.storage {
            Storage::Flag(bit) => PropertyValue::Bool(self.flags.get(bit)),
            Storage::Value => self
                .values
                .get(&slot.property)
                .cloned()
                .unwrap_or_else(|| slot.default.clone()),
        }
    }

    /// Returns true if the property holds its default value
    pub fn is_default(&self, property: Property) -> bool {
        match self.descriptor().slot(property) {
            Some(slot) => self.slot_is_default(slot),
            None => true,
        }
    }

    pub(crate) fn slot_is_default(&self, slot: &'static PropertySlot) -> bool {
        match slot.storage {
            Storage::Flag(bit) => slot.default.as_bool() == Some(self.flags.get(bit)),
            Storage::Value => !self.values.contains_key(&slot.property),
        }
    }

    /// Stored value of a slot that is known to differ from its default
    pub(crate) fn stored(&self, slot: &'static PropertySlot) -> Option<&PropertyValue> {
        self.values.get(&slot.property)
    }

    /// Assigns a property after checking that the kind declares it and that
    /// the value has the declared type
    pub fn set(&mut self, property: Property, value: PropertyValue) -> Result<(), Error> {
        let slot = self.descriptor().slot(property).ok_or_else(|| {
            Error::new(ErrorKind::UnknownProperty {
                kind: self.kind,
                property,
            })
        })?;

        if !slot.kind.accepts(&value) {
            return Err(Error::new(ErrorKind::TypeMismatch {
                property,
                expected: slot.kind,
            }));
        }

        let value = match (slot.kind, value) {
            (ValueKind::GroupIds, PropertyValue::IntArray(ids)) => {
                PropertyValue::IntArray(coerce_group_ids(ids)?)
            }
            (_, value) => value,
        };

        self.store(slot, value);
        Ok(())
    }

    /// Assigns an already validated value. Defaults are not stored.
    pub(crate) fn store(&mut self, slot: &'static PropertySlot, value: PropertyValue) {
        match slot.storage {
            Storage::Flag(bit) => {
                self.flags.set(bit, value.as_bool().unwrap_or_default());
            }
            Storage::Value if value == slot.default => {
                self.values.remove(&slot.property);
            }
            Storage::Value => {
                self.values.insert(slot.property, value);
            }
        }
    }

    /// Restores a property to its default
    pub fn reset(&mut self, property: Property) {
        if let Some(slot) = self.descriptor().slot(property) {
            self.store(slot, slot.default.clone());
        }
    }

    /// Adds a delta to a numeric property. Integer properties round the delta
    /// and wrap to their storage width.
    pub fn offset(&mut self, property: Property, delta: f64) -> Result<(), Error> {
        let current = self.get(property).ok_or_else(|| {
            Error::new(ErrorKind::UnknownProperty {
                kind: self.kind,
                property,
            })
        })?;

        let next = match current {
            PropertyValue::Int(x) => PropertyValue::Int(i64::from(x).wrapping_add(delta.round() as i64) as i32),
            PropertyValue::Short(x) => {
                PropertyValue::Short(i64::from(x).wrapping_add(delta.round() as i64) as i16)
            }
            PropertyValue::Double(x) => PropertyValue::Double(x + delta),
            _ => return Err(Error::new(ErrorKind::NotNumeric { property })),
        };

        self.set(property, next)
    }

    /// Iterates the slots whose values differ from their defaults, in
    /// declaration order
    pub fn properties(&self) -> impl Iterator<Item = (&'static PropertySlot, PropertyValue)> + '_ {
        self.descriptor()
            .slots()
            .filter(move |slot| !self.slot_is_default(*slot))
            .map(move |slot| (slot, self.slot_value(slot)))
    }

    /// Key value pairs that the object's kind doesn't declare, in the order
    /// they were read
    pub fn extra(&self) -> &[(u32, String)] {
        &self.extra
    }

    /// Sets an undeclared pair, replacing an earlier pair with the same key
    pub fn set_extra(&mut self, key: u32, raw: impl Into<String>) {
        let raw = raw.into();
        match self.extra.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = raw,
            None => self.extra.push((key, raw)),
        }
    }

    fn f64_of(&self, property: Property) -> f64 {
        self.values
            .get(&property)
            .and_then(|x| x.as_f64())
            .unwrap_or_default()
    }

    pub fn x(&self) -> f64 {
        self.f64_of(Property::X)
    }

    pub fn y(&self) -> f64 {
        self.f64_of(Property::Y)
    }

    pub fn rotation(&self) -> f64 {
        self.f64_of(Property::Rotation)
    }

    /// Moves the object. Every kind has a position so this can't fail.
    pub fn set_position(&mut self, x: f64, y: f64) {
        let descriptor = self.descriptor();
        for (property, value) in [(Property::X, x), (Property::Y, y)] {
            if let Some(slot) = descriptor.slot(property) {
                self.store(slot, PropertyValue::Double(value));
            }
        }
    }

    /// The groups the object belongs to
    pub fn group_ids(&self) -> &[i32] {
        self.values
            .get(&Property::GroupIds)
            .and_then(|x| x.as_int_array())
            .unwrap_or(&[])
    }

    pub fn set_group_ids(&mut self, ids: Vec<i32>) -> Result<(), Error> {
        self.set(Property::GroupIds, PropertyValue::IntArray(ids))
    }

    /// Ids are truncated to 16 bits the same way decoded ids are
    /// Adds the object to a group. Adding a group it already belongs to is a
    /// no-op.
    pub fn add_group_id(&mut self, id: i32) -> Result<(), Error> {
        let id = i32::from(id as i16);
        if self.group_ids().contains(&id) {
            return Ok(());
        }

        let mut ids = self.group_ids().to_vec();
        ids.push(id);
        self.set_group_ids(ids)
    }

    pub fn remove_group_id(&mut self, id: i32) -> Result<(), Error> {
        let id = i32::from(id as i16);
        let ids = self.group_ids().iter().copied().filter(|x| *x != id).collect();
        self.set_group_ids(ids)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for LevelObject {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::{SerializeMap, SerializeStruct};

        struct Properties<'a>(&'a LevelObject);

        impl<'a> serde::Serialize for Properties<'a> {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                let mut map = serializer.serialize_map(None)?;
                for (slot, value) in self.0.properties() {
                    map.serialize_entry(slot.property().name(), &value)?;
                }
                map.end()
            }
        }

        let mut state = serializer.serialize_struct("LevelObject", 4)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("properties", &Properties(self))?;
        state.serialize_field("extra", &self.extra)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Easing, HsvAdjustment};

    #[test]
    fn flag_set_bits() {
        let mut flags = FlagSet::default();
        flags.set(0, true);
        flags.set(31, true);
        assert!(flags.get(0));
        assert!(flags.get(31));
        assert!(!flags.get(16));
        flags.set(0, false);
        assert_eq!(flags.bits(), 1 << 31);
    }

    #[test]
    fn fresh_object_is_all_default() {
        for kind in ObjectKind::ALL {
            let object = LevelObject::new(*kind, 1);
            assert_eq!(object.properties().count(), 0);
            for slot in kind.descriptor().slots() {
                assert_eq!(&object.slot_value(slot), slot.default_value());
            }
        }
    }

    #[test]
    fn setting_default_clears_value() {
        let mut object = LevelObject::new(ObjectKind::MoveTrigger, 901);
        object.set(Property::Duration, 2.0.into()).unwrap();
        assert!(!object.is_default(Property::Duration));
        object.set(Property::Duration, 0.5.into()).unwrap();
        assert!(object.is_default(Property::Duration));
        assert_eq!(object, LevelObject::new(ObjectKind::MoveTrigger, 901));
    }

    #[test]
    fn flags_live_in_bitset() {
        let mut object = LevelObject::new(ObjectKind::MoveTrigger, 901);
        object.set(Property::LockToPlayerY, true.into()).unwrap();
        object.set(Property::FlipVertical, true.into()).unwrap();
        assert_eq!(object.flags().bits(), (1 << 17) | (1 << 1));
        assert_eq!(object.get(Property::LockToPlayerX), Some(false.into()));
        assert_eq!(object.get(Property::LockToPlayerY), Some(true.into()));
    }

    #[test]
    fn set_checks_kind_and_type() {
        let mut object = LevelObject::new(ObjectKind::RotateTrigger, 1346);
        assert!(matches!(
            object.set(Property::FollowGroupId, PropertyValue::Short(3)).unwrap_err().kind(),
            ErrorKind::UnknownProperty { .. }
        ));
        assert!(matches!(
            object.set(Property::CenterGroupId, PropertyValue::Int(3)).unwrap_err().kind(),
            ErrorKind::TypeMismatch { .. }
        ));
        object.set(Property::CenterGroupId, PropertyValue::Short(3)).unwrap();
        object.set(Property::Easing, Easing::BounceOut.into()).unwrap();
        assert_eq!(
            object.get(Property::Easing).and_then(|x| x.as_enum()).and_then(|x| x.as_easing()),
            Some(Easing::BounceOut)
        );
    }

    #[test]
    fn group_ids_are_validated() {
        let mut object = LevelObject::new(ObjectKind::Generic, 1);
        object.set_group_ids(vec![5, 10, 15]).unwrap();
        assert_eq!(object.group_ids(), &[5, 10, 15]);

        assert!(object.set_group_ids(vec![1, 1]).is_err());
        assert!(object.set_group_ids((1..=11).collect()).is_err());
        assert_eq!(object.group_ids(), &[5, 10, 15]);

        object.add_group_id(10).unwrap();
        assert_eq!(object.group_ids(), &[5, 10, 15]);
        object.add_group_id(20).unwrap();
        object.remove_group_id(5).unwrap();
        assert_eq!(object.group_ids(), &[10, 15, 20]);
    }

    #[test]
    fn edited_group_ids_match_decoded() {
        let mut object = LevelObject::new(ObjectKind::Generic, 1);
        assert!(matches!(
            object.set_group_ids(vec![70000, 4464]).unwrap_err().kind(),
            ErrorKind::InvalidGroupIds(crate::GroupIdsError::Duplicate(4464))
        ));

        object.set_group_ids(vec![70000]).unwrap();
        assert_eq!(object.group_ids(), &[4464]);
        object.add_group_id(4464 + 65536).unwrap();
        assert_eq!(object.group_ids(), &[4464]);
        object.add_group_id(65537).unwrap();
        assert_eq!(object.group_ids(), &[4464, 1]);

        let registry = crate::Registry::new();
        let text = crate::ObjectEncoder::new().encode(&object);
        let decoded = crate::ObjectDecoder::new(&registry).decode(&text).unwrap();
        assert!(decoded.skipped.is_empty());
        assert_eq!(decoded.object, object);

        object.remove_group_id(70000).unwrap();
        assert_eq!(object.group_ids(), &[1]);
    }

    #[test]
    fn offset_numeric_properties() {
        let mut object = LevelObject::new(ObjectKind::MoveTrigger, 901);
        object.set_position(10.0, 20.0);
        object.offset(Property::X, 5.5).unwrap();
        assert_eq!(object.x(), 15.5);

        object.offset(Property::MoveOffsetX, 2.6).unwrap();
        assert_eq!(object.get(Property::MoveOffsetX), Some(PropertyValue::Int(3)));

        object.set(Property::TargetGroupId, PropertyValue::Short(i16::MAX)).unwrap();
        object.offset(Property::TargetGroupId, 1.0).unwrap();
        assert_eq!(
            object.get(Property::TargetGroupId),
            Some(PropertyValue::Short(i16::MIN))
        );

        assert!(object.offset(Property::LockToPlayerX, 1.0).is_err());
    }

    #[test]
    fn hsv_property() {
        let mut object = LevelObject::new(ObjectKind::Generic, 1);
        let hsv = HsvAdjustment {
            hue: 20,
            ..HsvAdjustment::DEFAULT
        };
        object.set(Property::MainColorHsv, hsv.into()).unwrap();
        assert_eq!(object.get(Property::MainColorHsv), Some(PropertyValue::Hsv(hsv)));
        object.reset(Property::MainColorHsv);
        assert!(object.is_default(Property::MainColorHsv));
    }

    #[test]
    fn extras_replace_by_key() {
        let mut object = LevelObject::new(ObjectKind::Generic, 1);
        object.set_extra(500, "a");
        object.set_extra(501, "b");
        object.set_extra(500, "c");
        assert_eq!(
            object.extra(),
            &[(500, String::from("c")), (501, String::from("b"))]
        );
    }
}
