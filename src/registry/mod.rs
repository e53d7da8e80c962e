//! Catalog of object kinds and the property slots each kind declares.
//!
//! The catalog is split in two halves:
//!
//! - [`KindDescriptor`]s: flat, static descriptions of each [`ObjectKind`]
//!   (which object ids select it and its ordered property slots)
//! - [`Registry`]: lookup indices built once from the descriptors. Every
//!   property lookup is keyed by `(kind, key)`. The same numeric key means
//!   different things under different kinds, so there is intentionally no way
//!   to look up a slot by key alone.
//!
//! ```
//! use levelsave::{ObjectKind, Property, Registry};
//!
//! let registry = Registry::new();
//! assert_eq!(registry.kind_for(12).unwrap(), ObjectKind::CubePortal);
//!
//! let count = registry.slot(ObjectKind::CountTrigger, 80).unwrap();
//! let collision = registry.slot(ObjectKind::CollisionTrigger, 80).unwrap();
//! assert_eq!(count.property(), Property::ItemId);
//! assert_eq!(collision.property(), Property::BlockAId);
//! ```

pub mod ids;
mod kind;
mod slots;

pub use kind::ObjectKind;

use crate::{Error, ErrorKind, LevelObject, Property, PropertyValue, ValueKind};
use std::collections::HashMap;

/// The property key that holds the object id in every record
pub const OBJECT_ID_KEY: u32 = 1;

/// Where a slot's value lives inside a [`LevelObject`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    /// In the sparse value map
    Value,

    /// In the object's flag bitset at the given bit offset
    Flag(u8),
}

/// A single property slot of a kind: record key, meaning, type and default
#[derive(Debug)]
pub struct PropertySlot {
    pub(crate) key: u32,
    pub(crate) property: Property,
    pub(crate) kind: ValueKind,
    pub(crate) default: PropertyValue,
    pub(crate) storage: Storage,
}

impl PropertySlot {
    /// The numeric key used in records
    pub fn key(&self) -> u32 {
        self.key
    }

    /// What the key means for the kind that declares this slot
    pub fn property(&self) -> Property {
        self.property
    }

    /// The declared type of the value
    pub fn value_kind(&self) -> ValueKind {
        self.kind
    }

    /// The value a fresh object holds. Values equal to this are never written.
    pub fn default_value(&self) -> &PropertyValue {
        &self.default
    }

    pub fn storage(&self) -> Storage {
        self.storage
    }
}

/// Which object ids select a kind
#[derive(Debug, Clone, Copy)]
pub enum ObjectIds {
    /// Exactly one id
    Fixed(i32),

    /// Any id in the list. The first entry is used for fresh objects.
    Set(&'static [i32]),

    /// Any id the predicate accepts
    Predicate(fn(i32) -> bool),

    /// Any id not claimed by another kind
    Any,
}

impl ObjectIds {
    /// Returns true if the given object id selects this kind
    pub fn matches(&self, id: i32) -> bool {
        match *self {
            ObjectIds::Fixed(x) => x == id,
            ObjectIds::Set(xs) => xs.contains(&id),
            ObjectIds::Predicate(f) => f(id),
            ObjectIds::Any => true,
        }
    }
}

/// The static description of an object kind
#[derive(Debug)]
pub struct KindDescriptor {
    pub(crate) kind: ObjectKind,
    pub(crate) name: &'static str,
    pub(crate) ids: ObjectIds,
    pub(crate) slots: &'static [&'static [PropertySlot]],
}

impl KindDescriptor {
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn ids(&self) -> ObjectIds {
        self.ids
    }

    /// The object id given to freshly constructed objects of this kind, if
    /// the kind has a canonical one
    pub fn default_object_id(&self) -> Option<i32> {
        match self.ids {
            ObjectIds::Fixed(x) => Some(x),
            ObjectIds::Set(xs) => xs.first().copied(),
            _ => None,
        }
    }

    /// Iterates the slots in declaration order, which is also the order
    /// properties are written in
    pub fn slots(&self) -> impl Iterator<Item = &'static PropertySlot> + 'static {
        let groups: &'static [&'static [PropertySlot]] = self.slots;
        groups.iter().flat_map(|group| group.iter())
    }

    /// Finds the slot holding a property
    pub fn slot(&self, property: Property) -> Option<&'static PropertySlot> {
        self.slots().find(|slot| slot.property == property)
    }
}

/// Lookup tables from object ids to kinds and from `(kind, key)` to slots.
///
/// Build once with [`Registry::new`] and share it by reference; it is never
/// mutated afterwards and is safe to use from many threads.
#[derive(Debug)]
pub struct Registry {
    exact: HashMap<i32, ObjectKind>,
    grouped: Vec<(ObjectIds, ObjectKind)>,
    excluded: &'static [i32],
    slots: HashMap<(ObjectKind, u32), &'static PropertySlot>,
}

impl Registry {
    /// Builds the lookup tables from every kind descriptor
    pub fn new() -> Self {
        let mut exact = HashMap::new();
        let mut grouped = Vec::new();
        let mut slots = HashMap::new();

        for kind in ObjectKind::ALL {
            let descriptor = kind.descriptor();
            match descriptor.ids {
                ObjectIds::Fixed(id) => {
                    let prev = exact.insert(id, *kind);
                    debug_assert!(prev.is_none(), "object id {} claimed twice", id);
                }
                ObjectIds::Set(_) | ObjectIds::Predicate(_) => {
                    grouped.push((descriptor.ids, *kind));
                }
                ObjectIds::Any => {}
            }

            for slot in descriptor.slots() {
                let prev = slots.insert((*kind, slot.key), slot);
                debug_assert!(
                    prev.is_none(),
                    "key {} declared twice for {}",
                    slot.key,
                    kind
                );
            }
        }

        Registry {
            exact,
            grouped,
            excluded: &[ids::TELEPORT_PORTAL_EXIT],
            slots,
        }
    }

    /// Resolves the kind of an object id.
    ///
    /// Exact ids are checked first, then id groups in declaration order. Ids
    /// that only exist as part of another object are unresolvable. Everything
    /// else falls back to [`ObjectKind::Generic`].
    pub fn kind_for(&self, object_id: i32) -> Result<ObjectKind, Error> {
        if let Some(kind) = self.exact.get(&object_id) {
            return Ok(*kind);
        }

        if let Some((_, kind)) = self.grouped.iter().find(|(ids, _)| ids.matches(object_id)) {
            return Ok(*kind);
        }

        if self.excluded.contains(&object_id) {
            return Err(Error::new(ErrorKind::UnresolvableObjectKind { object_id }));
        }

        Ok(ObjectKind::Generic)
    }

    /// Looks up the slot a record key refers to for the given kind
    pub fn slot(&self, kind: ObjectKind, key: u32) -> Option<&'static PropertySlot> {
        self.slots.get(&(kind, key)).copied()
    }

    /// Creates an object with every property at its default
    pub fn instantiate(&self, object_id: i32) -> Result<LevelObject, Error> {
        let kind = self.kind_for(object_id)?;
        Ok(LevelObject::new(kind, object_id))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case(12, ObjectKind::CubePortal)]
    #[case(13, ObjectKind::ShipPortal)]
    #[case(10, ObjectKind::GravityPortal)]
    #[case(1334, ObjectKind::SpeedPortal)]
    #[case(747, ObjectKind::TeleportPortal)]
    #[case(85, ObjectKind::RotatingObject)]
    #[case(1022, ObjectKind::Orb)]
    #[case(899, ObjectKind::ColorTrigger)]
    #[case(29, ObjectKind::ColorTrigger)]
    #[case(901, ObjectKind::MoveTrigger)]
    #[case(1815, ObjectKind::CollisionTrigger)]
    #[case(914, ObjectKind::TextObject)]
    #[case(1, ObjectKind::Generic)]
    #[case(8, ObjectKind::Generic)]
    #[case(-5, ObjectKind::Generic)]
    fn kind_resolution(#[case] id: i32, #[case] expected: ObjectKind) {
        let registry = Registry::new();
        assert_eq!(registry.kind_for(id).unwrap(), expected);
    }

    #[test]
    fn teleport_exit_is_unresolvable() {
        let registry = Registry::new();
        let err = registry.kind_for(ids::TELEPORT_PORTAL_EXIT).unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::UnresolvableObjectKind { object_id: 749 }
        ));
    }

    #[test]
    fn keys_and_flag_bits_unique_per_kind() {
        for kind in ObjectKind::ALL {
            let slots: Vec<_> = kind.descriptor().slots().collect();
            for (i, a) in slots.iter().enumerate() {
                assert_ne!(a.key, OBJECT_ID_KEY, "{} redeclares the object id", kind);
                for b in &slots[i + 1..] {
                    assert_ne!(a.key, b.key, "{} has duplicate key {}", kind, a.key);
                    assert_ne!(a.property, b.property, "{} has duplicate {}", kind, a.property);
                    if let (Storage::Flag(x), Storage::Flag(y)) = (a.storage, b.storage) {
                        assert_ne!(x, y, "{} has overlapping flag bits", kind);
                    }
                }
            }
        }
    }

    #[test]
    fn slot_types_are_consistent() {
        for kind in ObjectKind::ALL {
            for slot in kind.descriptor().slots() {
                assert!(slot.kind.accepts(&slot.default), "{} {}", kind, slot.property);
                match slot.storage {
                    Storage::Flag(bit) => {
                        assert_eq!(slot.kind, ValueKind::Bool);
                        assert!(u32::from(bit) < crate::FlagSet::CAPACITY);
                    }
                    Storage::Value => assert_ne!(slot.kind, ValueKind::Bool),
                }
            }
        }
    }

    #[test]
    fn fixed_ids_resolve_to_their_kind() {
        let registry = Registry::new();
        for kind in ObjectKind::ALL {
            if let Some(id) = kind.descriptor().default_object_id() {
                assert_eq!(registry.kind_for(id).unwrap(), *kind);
            }
        }
    }

    #[test]
    fn overloaded_keys_resolve_per_kind() {
        let registry = Registry::new();
        let lookup = |kind, key| registry.slot(kind, key).map(|x| x.property());
        assert_eq!(lookup(ObjectKind::MoveTrigger, 71), Some(Property::TargetPosGroupId));
        assert_eq!(lookup(ObjectKind::RotateTrigger, 71), Some(Property::CenterGroupId));
        assert_eq!(lookup(ObjectKind::FollowTrigger, 71), Some(Property::FollowGroupId));
        assert_eq!(lookup(ObjectKind::CollisionBlock, 80), Some(Property::BlockId));
        assert_eq!(lookup(ObjectKind::PickupTrigger, 77), Some(Property::PickupCount));
        assert_eq!(lookup(ObjectKind::CountTrigger, 77), Some(Property::TargetCount));
        assert_eq!(lookup(ObjectKind::Generic, 80), None);
    }

    #[test]
    fn triggers_are_identified() {
        assert!(ObjectKind::MoveTrigger.is_trigger());
        assert!(ObjectKind::BgEffectTrigger.is_trigger());
        assert!(!ObjectKind::CubePortal.is_trigger());
    }

    #[test]
    fn registry_is_shareable() {
        fn assert_sync<T: Send + Sync>() {}
        assert_sync::<Registry>();
    }
}
